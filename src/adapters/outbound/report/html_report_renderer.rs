use super::ReportTemplate;
use crate::adapters::outbound::filesystem::FileSystemWriter;
use crate::pipeline::domain::ReportRecord;
use crate::ports::outbound::{OutputPresenter, ReportRenderer};
use crate::shared::error::PipelineError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// HtmlReportRenderer adapter producing the final HTML report
///
/// The template is loaded and parsed on every render, then the whole
/// document is rendered in memory before anything touches the destination.
pub struct HtmlReportRenderer {
    template_path: Option<PathBuf>,
}

impl HtmlReportRenderer {
    /// Renders with the built-in template
    pub fn new() -> Self {
        Self {
            template_path: None,
        }
    }

    /// Renders with the template at `template_path`
    pub fn with_template(template_path: PathBuf) -> Self {
        Self {
            template_path: Some(template_path),
        }
    }

    fn load_template(&self, destination: &Path) -> Result<ReportTemplate> {
        let render_error = |details: String| PipelineError::Render {
            path: destination.to_path_buf(),
            details,
        };

        let template = match &self.template_path {
            None => ReportTemplate::builtin(),
            Some(path) => {
                let bytes = read_regular_file(path, "report template")
                    .map_err(|e| render_error(e.to_string()))?;
                let source = String::from_utf8(bytes).map_err(|e| {
                    render_error(format!("Template {} is not UTF-8: {}", path.display(), e))
                })?;
                ReportTemplate::parse(&source)
            }
        };

        template.map_err(|e| render_error(format!("Invalid report template: {}", e)).into())
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, destination: &Path, record: &ReportRecord) -> Result<()> {
        let template = self.load_template(destination)?;
        let html = template.render(record);
        FileSystemWriter::new(destination.to_path_buf()).present(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::{ProjectCoordinates, ProjectIdentifier};
    use std::fs;
    use tempfile::TempDir;

    fn record() -> ReportRecord {
        ReportRecord::new(
            &ProjectCoordinates::new("demo-app", "1.0.0"),
            "http://dtrack:8080/api/v1",
            &ProjectIdentifier::new("xyz".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_render_builtin_template() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("report.html");

        HtmlReportRenderer::new()
            .render(&destination, &record())
            .unwrap();

        let html = fs::read_to_string(&destination).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("demo-app"));
        assert!(html.contains("1.0.0"));
        assert!(html.contains("http://dtrack:8080/project/xyz"));
    }

    #[test]
    fn test_render_custom_template() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("custom.tmpl");
        fs::write(&template, "{{ .ProjectName }}@{{ .ProjectVersion }} -> {{ .DTProjectLink }}")
            .unwrap();
        let destination = dir.path().join("report.html");

        HtmlReportRenderer::with_template(template)
            .render(&destination, &record())
            .unwrap();

        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "demo-app@1.0.0 -> http://dtrack:8080/project/xyz"
        );
    }

    #[test]
    fn test_missing_template_is_render_error_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("report.html");

        let err = HtmlReportRenderer::with_template(dir.path().join("missing.tmpl"))
            .render(&destination, &record())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Render { .. })
        ));
        assert!(!destination.exists());
    }

    #[test]
    fn test_unparsable_template_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("broken.tmpl");
        fs::write(&template, "<p>{{ project_name </p>").unwrap();
        let destination = dir.path().join("report.html");

        let err = HtmlReportRenderer::with_template(template)
            .render(&destination, &record())
            .unwrap_err();

        assert!(err.to_string().contains("Invalid report template"));
        assert!(!destination.exists());
    }

    #[test]
    fn test_unwritable_destination_is_render_error() {
        let err = HtmlReportRenderer::new()
            .render(Path::new("/nonexistent/dir/report.html"), &record())
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Render { .. })
        ));
    }
}
