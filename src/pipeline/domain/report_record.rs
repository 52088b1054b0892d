use super::{DeepLink, ProjectCoordinates, ProjectIdentifier};

/// The values substituted into the report template
///
/// Only exists for the duration of one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    project_name: String,
    project_version: String,
    link: DeepLink,
}

impl ReportRecord {
    pub fn new(
        coordinates: &ProjectCoordinates,
        api_base_url: &str,
        identifier: &ProjectIdentifier,
    ) -> Self {
        Self {
            project_name: coordinates.name().to_string(),
            project_version: coordinates.version().to_string(),
            link: DeepLink::from_api_base(api_base_url, identifier.as_str()),
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_version(&self) -> &str {
        &self.project_version
    }

    pub fn link(&self) -> &DeepLink {
        &self.link
    }
}
