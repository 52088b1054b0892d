use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A generated SBOM manifest
///
/// The contents are never parsed; they are passed through to the
/// intelligence service byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomArtifact {
    path: PathBuf,
    contents: Vec<u8>,
}

impl SbomArtifact {
    pub fn new(path: PathBuf, contents: Vec<u8>) -> Self {
        Self { path, contents }
    }

    /// Reads the manifest the generator wrote at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_regular_file(path, "SBOM")?;
        Ok(Self::new(path.to_path_buf(), contents))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// File name sent with the multipart upload
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bom.json".to_string())
    }
}
