/// API path every Dependency-Track REST endpoint lives under
pub const API_PATH_SUFFIX: &str = "/api/v1";

/// Human-facing URL of a project's results page
///
/// Derived from the configured API base URL by removing [`API_PATH_SUFFIX`]
/// and appending `/project/<identifier>`. When the base URL does not end in
/// the suffix, the same number of trailing characters is still removed, so
/// the link is malformed; `is_well_formed()` reports this so the caller can
/// warn instead of failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    url: String,
    well_formed: bool,
}

impl DeepLink {
    pub fn from_api_base(api_base_url: &str, project_identifier: &str) -> Self {
        let base = api_base_url.trim_end_matches('/');
        let (ui_root, well_formed) = match base.strip_suffix(API_PATH_SUFFIX) {
            Some(root) => (root, true),
            None => (truncate_suffix_length(base), false),
        };

        Self {
            url: format!(
                "{}/project/{}",
                ui_root,
                urlencoding::encode(project_identifier)
            ),
            well_formed,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn is_well_formed(&self) -> bool {
        self.well_formed
    }
}

impl std::fmt::Display for DeepLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Drops `API_PATH_SUFFIX.len()` trailing bytes, backing off to a char boundary
fn truncate_suffix_length(base: &str) -> &str {
    let mut cut = base.len().saturating_sub(API_PATH_SUFFIX.len());
    while !base.is_char_boundary(cut) {
        cut -= 1;
    }
    &base[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_api_suffix() {
        let link = DeepLink::from_api_base("http://dtrack.example.com:8080/api/v1", "xyz");
        assert_eq!(link.as_str(), "http://dtrack.example.com:8080/project/xyz");
        assert!(link.is_well_formed());
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let link = DeepLink::from_api_base("http://dtrack/api/v1/", "abc-123");
        assert_eq!(link.as_str(), "http://dtrack/project/abc-123");
        assert!(link.is_well_formed());
    }

    #[test]
    fn test_missing_suffix_produces_malformed_link() {
        let link = DeepLink::from_api_base("https://dtrack.example.com", "xyz");
        assert_eq!(link.as_str(), "https://dtrack.exam/project/xyz");
        assert!(!link.is_well_formed());
    }

    #[test]
    fn test_short_base_does_not_panic() {
        let link = DeepLink::from_api_base("http", "xyz");
        assert_eq!(link.as_str(), "/project/xyz");
        assert!(!link.is_well_formed());
    }

    #[test]
    fn test_multibyte_base_does_not_panic() {
        let link = DeepLink::from_api_base("https://ドメイン.jp", "xyz");
        assert!(link.as_str().ends_with("/project/xyz"));
        assert!(!link.is_well_formed());
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let link = DeepLink::from_api_base("http://dtrack/api/v1", "a b/c");
        assert_eq!(link.as_str(), "http://dtrack/project/a%20b%2Fc");
    }
}
