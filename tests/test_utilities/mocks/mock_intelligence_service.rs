use sbom_pipeline::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock IntelligenceService with scripted lookup results
#[derive(Default, Clone)]
pub struct MockIntelligenceService {
    pub records: Vec<ProjectRecord>,
    pub fail_submit: bool,
    pub fail_lookup: bool,
    pub submissions: Arc<Mutex<Vec<(String, String, Vec<u8>)>>>,
}

impl MockIntelligenceService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, uuid: &str) -> Self {
        self.records.push(ProjectRecord::with_uuid(uuid));
        self
    }

    pub fn with_submit_failure(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn with_lookup_failure(mut self) -> Self {
        self.fail_lookup = true;
        self
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

impl IntelligenceService for MockIntelligenceService {
    fn submit_bom(&self, project: &ProjectCoordinates, sbom: &SbomArtifact) -> Result<()> {
        if self.fail_submit {
            anyhow::bail!("HTTP 401 Unauthorized: invalid API key");
        }
        self.submissions.lock().unwrap().push((
            project.name().to_string(),
            project.version().to_string(),
            sbom.contents().to_vec(),
        ));
        Ok(())
    }

    fn find_projects(&self, _project: &ProjectCoordinates) -> Result<Vec<ProjectRecord>> {
        if self.fail_lookup {
            anyhow::bail!("HTTP 503 Service Unavailable");
        }
        Ok(self.records.clone())
    }
}
