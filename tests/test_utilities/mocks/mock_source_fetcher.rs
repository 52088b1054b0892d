use sbom_pipeline::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock SourceFetcher that writes a fake checkout instead of cloning
#[derive(Default, Clone)]
pub struct MockSourceFetcher {
    pub should_fail: bool,
    pub targets: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockSourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Directories the fetcher was asked to populate
    pub fn targets(&self) -> Vec<PathBuf> {
        self.targets.lock().unwrap().clone()
    }
}

impl SourceFetcher for MockSourceFetcher {
    fn fetch(&self, repository_url: &str, target_dir: &Path) -> Result<()> {
        self.targets.lock().unwrap().push(target_dir.to_path_buf());
        if self.should_fail {
            anyhow::bail!("Mock fetch failure for {}", repository_url);
        }
        fs::write(
            target_dir.join("package.json"),
            r#"{"name":"demo-app","version":"1.0.0"}"#,
        )?;
        Ok(())
    }
}
