//! Run configuration for sbom-pipeline.
//!
//! A single YAML (or TOML, by extension) document maps onto
//! [`RunConfiguration`]. Keys that are missing default to empty values;
//! their values are not validated here and surface as failures in the step
//! that uses them.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ports::outbound::ProgressReporter;
use crate::shared::error::PipelineError;
use crate::shared::Result;

pub const DEFAULT_CONFIG_FILENAME: &str = "config.yaml";

/// Environment variable consulted when the document carries no API key
pub const API_KEY_ENV_VAR: &str = "DEPENDENCY_TRACK_API_KEY";

/// Which external tool produces the SBOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SbomToolchain {
    /// `npx @cyclonedx/bom`
    #[default]
    Npm,
    /// `mvn org.cyclonedx:cyclonedx-maven-plugin:makeAggregateBom`
    Maven,
    /// `./gradlew cyclonedxBom` through an injected init script
    Gradle,
    /// Maven when `pom.xml` is present, then Gradle for `build.gradle`,
    /// then npm for `package.json`
    Auto,
}

impl FromStr for SbomToolchain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" | "node" => Ok(SbomToolchain::Npm),
            "maven" | "mvn" => Ok(SbomToolchain::Maven),
            "gradle" => Ok(SbomToolchain::Gradle),
            "auto" => Ok(SbomToolchain::Auto),
            _ => Err(format!(
                "Invalid sbom_tool: {}. Please specify 'npm', 'maven', 'gradle' or 'auto'",
                s
            )),
        }
    }
}

impl fmt::Display for SbomToolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SbomToolchain::Npm => write!(f, "npm"),
            SbomToolchain::Maven => write!(f, "maven"),
            SbomToolchain::Gradle => write!(f, "gradle"),
            SbomToolchain::Auto => write!(f, "auto"),
        }
    }
}

/// On-disk document schema.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    #[serde(alias = "node_repo_url")]
    repo_url: String,
    sbom_file: String,
    dependency_track_api_url: String,
    dependency_track_api_key: String,
    project_name: String,
    project_version: String,
    report_file: String,
    sbom_tool: Option<String>,
    report_template: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    unknown_fields: HashMap<String, serde_json::Value>,
}

/// Immutable configuration for one pipeline run.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RunConfiguration {
    pub repo_url: String,
    /// SBOM file name, relative to the workspace root
    pub sbom_file: String,
    /// Base URL of the REST API, e.g. `http://dtrack:8080/api/v1`
    pub dependency_track_api_url: String,
    pub dependency_track_api_key: String,
    pub project_name: String,
    pub project_version: String,
    pub report_file: PathBuf,
    pub sbom_tool: SbomToolchain,
    /// Overrides the built-in report template
    pub report_template: Option<PathBuf>,
}

// The API key never appears in logs or error output.
impl fmt::Debug for RunConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.dependency_track_api_key.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("RunConfiguration")
            .field("repo_url", &self.repo_url)
            .field("sbom_file", &self.sbom_file)
            .field("dependency_track_api_url", &self.dependency_track_api_url)
            .field("dependency_track_api_key", &key)
            .field("project_name", &self.project_name)
            .field("project_version", &self.project_version)
            .field("report_file", &self.report_file)
            .field("sbom_tool", &self.sbom_tool)
            .field("report_template", &self.report_template)
            .finish()
    }
}

impl RunConfiguration {
    /// Names of the required keys that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.repo_url.is_empty() {
            missing.push("repo_url");
        }
        if self.sbom_file.is_empty() {
            missing.push("sbom_file");
        }
        if self.dependency_track_api_url.is_empty() {
            missing.push("dependency_track_api_url");
        }
        if self.dependency_track_api_key.is_empty() {
            missing.push("dependency_track_api_key");
        }
        if self.project_name.is_empty() {
            missing.push("project_name");
        }
        if self.project_version.is_empty() {
            missing.push("project_version");
        }
        if self.report_file.as_os_str().is_empty() {
            missing.push("report_file");
        }
        missing
    }

    /// Fills an empty API key from the environment
    pub fn with_env_api_key<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.dependency_track_api_key.is_empty() {
            if let Some(key) = lookup(API_KEY_ENV_VAR).filter(|k| !k.is_empty()) {
                self.dependency_track_api_key = key;
            }
        }
        self
    }
}

/// Load the run configuration from `path`.
///
/// `.toml` files are parsed as TOML, everything else as YAML. Unknown and
/// empty keys are reported to `reporter` as warnings.
pub fn load_run_configuration<P: ProgressReporter>(
    path: &Path,
    reporter: &P,
) -> Result<RunConfiguration> {
    let config_error = |details: String| PipelineError::Config {
        path: path.to_path_buf(),
        details,
    };

    let content = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;

    let file = parse_document(path, &content).map_err(config_error)?;
    warn_unknown_fields(&file, reporter);

    let sbom_tool = match file.sbom_tool.as_deref() {
        Some(value) => value.parse().map_err(config_error)?,
        None => SbomToolchain::default(),
    };

    let config = RunConfiguration {
        repo_url: file.repo_url,
        sbom_file: file.sbom_file,
        dependency_track_api_url: file.dependency_track_api_url,
        dependency_track_api_key: file.dependency_track_api_key,
        project_name: file.project_name,
        project_version: file.project_version,
        report_file: PathBuf::from(file.report_file),
        sbom_tool,
        report_template: file.report_template,
    }
    .with_env_api_key(|name| std::env::var(name).ok());

    warn_missing_fields(&config, reporter);
    Ok(config)
}

fn parse_document(path: &Path, content: &str) -> std::result::Result<ConfigFile, String> {
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(content).map_err(|e| e.to_string())
    } else if content.trim().is_empty() {
        // An empty YAML document is a null, which does not map onto a struct.
        Ok(ConfigFile::default())
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
    }
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields<P: ProgressReporter>(file: &ConfigFile, reporter: &P) {
    let mut keys: Vec<&String> = file.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        reporter.report_error(&format!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        ));
    }
}

fn warn_missing_fields<P: ProgressReporter>(config: &RunConfiguration, reporter: &P) {
    for key in config.missing_fields() {
        reporter.report_error(&format!(
            "⚠️  Warning: Config field '{}' is missing or empty.",
            key
        ));
    }
}
