use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::path::{Component, Path, PathBuf};
use tempfile::TempDir;

const WORKSPACE_PREFIX: &str = "sbom-pipeline-";

/// Run-scoped temporary directory holding the cloned source and the SBOM
///
/// The directory is removed when the value is dropped, so every exit path
/// of the orchestrator releases it exactly once. `close()` does the same but
/// reports removal failures.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a fresh, empty directory under the system temp dir
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|e| PipelineError::Workspace {
                details: e.to_string(),
            })?;
        Ok(Self { dir })
    }

    /// Creates the workspace under `parent` instead of the system temp dir
    pub fn create_in(parent: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| PipelineError::Workspace {
                details: format!("{}: {}", parent.display(), e),
            })?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Resolves a file name relative to the workspace root
    ///
    /// The result always stays inside the workspace: root and drive
    /// prefixes are dropped and `..` never climbs above the root.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        let mut contained = PathBuf::new();
        for component in relative.as_ref().components() {
            match component {
                Component::Normal(part) => contained.push(part),
                Component::ParentDir => {
                    contained.pop();
                }
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
            }
        }
        self.dir.path().join(contained)
    }

    /// Removes the directory now, surfacing any I/O error
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| {
            anyhow::anyhow!("Failed to remove workspace {}: {}", path.display(), e)
        })
    }
}
