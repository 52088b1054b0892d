use sbom_pipeline::prelude::*;
use std::fs;
use std::path::Path;

pub const MOCK_SBOM: &str = r#"{"bomFormat":"CycloneDX","specVersion":"1.5","components":[]}"#;

/// Mock SbomGenerator writing a fixed CycloneDX document
#[derive(Default, Clone)]
pub struct MockSbomGenerator {
    pub should_fail: bool,
}

impl MockSbomGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self { should_fail: true }
    }
}

impl SbomGenerator for MockSbomGenerator {
    fn tool_name(&self) -> String {
        "mock-generator".to_string()
    }

    fn generate(&self, app_dir: &Path, output_file: &Path) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("Mock generator exited with status 1");
        }
        if !app_dir.join("package.json").exists() {
            anyhow::bail!("No package.json in {}", app_dir.display());
        }
        fs::write(output_file, MOCK_SBOM)?;
        Ok(())
    }
}
