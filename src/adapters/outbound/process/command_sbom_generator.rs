use crate::config::SbomToolchain;
use crate::ports::outbound::SbomGenerator;
use crate::shared::error::PipelineError;
use crate::shared::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const CYCLONEDX_MAVEN_PLUGIN: &str = "org.cyclonedx:cyclonedx-maven-plugin:2.7.9:makeAggregateBom";

const GRADLE_INIT_SCRIPT_NAME: &str = "cyclonedx.init.gradle";

/// Applies the CycloneDX plugin to the root project without touching the
/// build files
const GRADLE_INIT_SCRIPT: &str = r#"initscript {
    repositories {
        mavenCentral()
    }
    dependencies {
        classpath 'org.cyclonedx:cyclonedx-gradle-plugin:1.7.5'
    }
}
rootProject {
    apply plugin: 'org.cyclonedx.bom'
}
"#;

/// How a tool is told where to put its manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputConvention {
    /// `<flag> <output path>` is appended to the arguments
    Flag(String),
    /// The tool writes to this path (relative to the app directory); the
    /// file is moved to the requested location afterwards
    FixedPath(PathBuf),
}

/// A fully specified external SBOM command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomCommand {
    program: String,
    args: Vec<String>,
    output: OutputConvention,
    /// Files written into the app directory before the tool starts
    setup_files: Vec<(PathBuf, String)>,
}

impl SbomCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I, output: OutputConvention) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            output,
            setup_files: Vec::new(),
        }
    }

    /// Writes `contents` to `relative` (inside the app directory) before running
    pub fn with_setup_file(
        mut self,
        relative: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Self {
        self.setup_files.push((relative.into(), contents.into()));
        self
    }

    /// CycloneDX Node.js CLI: `npx @cyclonedx/bom -o <file>`
    pub fn npm() -> Self {
        Self::new(
            "npx",
            ["@cyclonedx/bom"],
            OutputConvention::Flag("-o".to_string()),
        )
    }

    /// CycloneDX Maven plugin, writing `target/<stem>.json`
    pub fn maven(output_stem: &str) -> Self {
        Self::new(
            "mvn",
            [
                CYCLONEDX_MAVEN_PLUGIN.to_string(),
                "-Dcyclonedx.outputFormat=json".to_string(),
                format!("-Dcyclonedx.outputName={}", output_stem),
            ],
            OutputConvention::FixedPath(PathBuf::from("target").join(format!("{}.json", output_stem))),
        )
    }

    /// CycloneDX Gradle plugin via the project's wrapper, writing
    /// `build/reports/bom.json`
    pub fn gradle() -> Self {
        Self::new(
            "./gradlew",
            [
                "-I",
                GRADLE_INIT_SCRIPT_NAME,
                "cyclonedxBom",
                "-Dcyclonedx.outputFormat=json",
            ],
            OutputConvention::FixedPath(PathBuf::from("build/reports/bom.json")),
        )
        .with_setup_file(GRADLE_INIT_SCRIPT_NAME, GRADLE_INIT_SCRIPT)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `./`-relative programs live in the app directory
    fn program_path(&self, app_dir: &Path) -> PathBuf {
        match self.program.strip_prefix("./") {
            Some(relative) => app_dir.join(relative),
            None => PathBuf::from(&self.program),
        }
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// CommandSbomGenerator adapter running an SBOM CLI as a child process
///
/// The child inherits stdout and stderr so the tool's own diagnostics reach
/// the operator unchanged.
pub struct CommandSbomGenerator {
    toolchain: SbomToolchain,
    command_override: Option<SbomCommand>,
}

impl CommandSbomGenerator {
    pub fn new(toolchain: SbomToolchain) -> Self {
        Self {
            toolchain,
            command_override: None,
        }
    }

    /// Uses `command` regardless of the toolchain
    pub fn with_command(command: SbomCommand) -> Self {
        Self {
            toolchain: SbomToolchain::Npm,
            command_override: Some(command),
        }
    }

    fn resolve_command(&self, app_dir: &Path, output_file: &Path) -> Result<SbomCommand> {
        if let Some(command) = &self.command_override {
            return Ok(command.clone());
        }

        let toolchain = match self.toolchain {
            SbomToolchain::Auto => detect_toolchain(app_dir).ok_or_else(|| {
                PipelineError::SbomGeneration {
                    tool: "auto".to_string(),
                    details: format!(
                        "No pom.xml, build.gradle or package.json found in {}",
                        app_dir.display()
                    ),
                }
            })?,
            explicit => explicit,
        };

        Ok(match toolchain {
            SbomToolchain::Maven => {
                let stem = output_file
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "sbom".to_string());
                SbomCommand::maven(&stem)
            }
            SbomToolchain::Gradle => SbomCommand::gradle(),
            _ => SbomCommand::npm(),
        })
    }

    fn failure(command: &SbomCommand, details: String) -> anyhow::Error {
        PipelineError::SbomGeneration {
            tool: command.program().to_string(),
            details,
        }
        .into()
    }
}

impl Default for CommandSbomGenerator {
    fn default() -> Self {
        Self::new(SbomToolchain::default())
    }
}

impl SbomGenerator for CommandSbomGenerator {
    fn tool_name(&self) -> String {
        match &self.command_override {
            Some(command) => command.program().to_string(),
            None => match self.toolchain {
                SbomToolchain::Npm => "npx @cyclonedx/bom".to_string(),
                SbomToolchain::Maven => "cyclonedx-maven-plugin".to_string(),
                SbomToolchain::Gradle => "cyclonedx-gradle-plugin".to_string(),
                SbomToolchain::Auto => "auto-detected CycloneDX tool".to_string(),
            },
        }
    }

    fn generate(&self, app_dir: &Path, output_file: &Path) -> Result<()> {
        let command = self.resolve_command(app_dir, output_file)?;

        for (relative, contents) in &command.setup_files {
            let path = app_dir.join(relative);
            fs::write(&path, contents).map_err(|e| {
                Self::failure(
                    &command,
                    format!("Failed to write {}: {}", path.display(), e),
                )
            })?;
        }

        let mut process = Command::new(command.program_path(app_dir));
        process
            .args(&command.args)
            .current_dir(app_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let OutputConvention::Flag(flag) = &command.output {
            process.arg(flag).arg(output_file);
        }

        let status = process.status().map_err(|e| {
            let details = if e.kind() == io::ErrorKind::NotFound {
                format!("Command '{}' was not found on PATH", command.program)
            } else {
                format!("Failed to start '{}': {}", command.display(), e)
            };
            Self::failure(&command, details)
        })?;

        if !status.success() {
            return Err(Self::failure(
                &command,
                format!("'{}' exited with {}", command.display(), status),
            ));
        }

        if let OutputConvention::FixedPath(relative) = &command.output {
            let produced = app_dir.join(relative);
            if produced != output_file {
                fs::rename(&produced, output_file).map_err(|e| {
                    Self::failure(
                        &command,
                        format!(
                            "Failed to move {} to {}: {}",
                            produced.display(),
                            output_file.display(),
                            e
                        ),
                    )
                })?;
            }
        }

        if !output_file.is_file() {
            return Err(Self::failure(
                &command,
                format!(
                    "'{}' succeeded but produced no file at {}",
                    command.display(),
                    output_file.display()
                ),
            ));
        }

        Ok(())
    }
}

/// Picks a toolchain from the build files present in `app_dir`
pub fn detect_toolchain(app_dir: &Path) -> Option<SbomToolchain> {
    if app_dir.join("pom.xml").is_file() {
        Some(SbomToolchain::Maven)
    } else if app_dir.join("build.gradle").is_file()
        || app_dir.join("build.gradle.kts").is_file()
    {
        Some(SbomToolchain::Gradle)
    } else if app_dir.join("package.json").is_file() {
        Some(SbomToolchain::Npm)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str, output: OutputConvention) -> CommandSbomGenerator {
        CommandSbomGenerator::with_command(SbomCommand::new(
            "sh",
            ["-c", script, "sh"],
            output,
        ))
    }

    #[test]
    fn test_npm_command_shape() {
        let command = SbomCommand::npm();
        assert_eq!(command.program(), "npx");
        assert_eq!(command.args, vec!["@cyclonedx/bom".to_string()]);
        assert_eq!(command.output, OutputConvention::Flag("-o".to_string()));
    }

    #[test]
    fn test_maven_command_shape() {
        let command = SbomCommand::maven("bom");
        assert_eq!(command.program(), "mvn");
        assert!(command
            .args
            .contains(&"-Dcyclonedx.outputName=bom".to_string()));
        assert_eq!(
            command.output,
            OutputConvention::FixedPath(PathBuf::from("target/bom.json"))
        );
    }

    #[test]
    fn test_detect_toolchain() {
        let dir = TempDir::new().unwrap();
        assert_eq!(detect_toolchain(dir.path()), None);

        fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert_eq!(detect_toolchain(dir.path()), Some(SbomToolchain::Npm));

        fs::write(dir.path().join("build.gradle"), "").unwrap();
        assert_eq!(detect_toolchain(dir.path()), Some(SbomToolchain::Gradle));

        fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();
        assert_eq!(detect_toolchain(dir.path()), Some(SbomToolchain::Maven));
    }

    #[test]
    fn test_gradle_command_shape() {
        let command = SbomCommand::gradle();
        assert_eq!(command.program(), "./gradlew");
        assert_eq!(
            command.args,
            vec![
                "-I".to_string(),
                "cyclonedx.init.gradle".to_string(),
                "cyclonedxBom".to_string(),
                "-Dcyclonedx.outputFormat=json".to_string(),
            ]
        );
        assert_eq!(
            command.output,
            OutputConvention::FixedPath(PathBuf::from("build/reports/bom.json"))
        );
        assert_eq!(command.setup_files.len(), 1);
        assert_eq!(command.setup_files[0].0, PathBuf::from("cyclonedx.init.gradle"));
        assert!(command.setup_files[0]
            .1
            .contains("org.cyclonedx:cyclonedx-gradle-plugin"));
    }

    #[test]
    fn test_wrapper_program_resolves_inside_app_dir() {
        let app_dir = Path::new("/work/app");
        assert_eq!(
            SbomCommand::gradle().program_path(app_dir),
            PathBuf::from("/work/app/gradlew")
        );
        assert_eq!(SbomCommand::npm().program_path(app_dir), PathBuf::from("npx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_gradle_wrapper_runs_with_init_script() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let wrapper = dir.path().join("gradlew");
        // Stands in for the wrapper: requires the init script, then writes
        // the report where the plugin would.
        fs::write(
            &wrapper,
            "#!/bin/sh\ntest \"$2\" = cyclonedx.init.gradle && test -f \"$2\" || exit 9\nmkdir -p build/reports && printf '{\"bomFormat\":\"CycloneDX\"}' > build/reports/bom.json\n",
        )
        .unwrap();
        fs::set_permissions(&wrapper, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.path().join("build.gradle"), "").unwrap();
        let output = dir.path().join("bom.json");

        CommandSbomGenerator::new(SbomToolchain::Auto)
            .generate(dir.path(), &output)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            r#"{"bomFormat":"CycloneDX"}"#
        );
        assert!(dir.path().join("cyclonedx.init.gradle").is_file());
    }

    #[test]
    fn test_auto_without_build_files_fails() {
        let dir = TempDir::new().unwrap();
        let generator = CommandSbomGenerator::new(SbomToolchain::Auto);

        let err = generator
            .generate(dir.path(), &dir.path().join("bom.json"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::SbomGeneration { .. })
        ));
    }

    #[test]
    fn test_missing_program_is_reported() {
        let dir = TempDir::new().unwrap();
        let generator = CommandSbomGenerator::with_command(SbomCommand::new(
            "definitely-not-an-sbom-tool-7f3a",
            Vec::<String>::new(),
            OutputConvention::Flag("-o".to_string()),
        ));

        let err = generator
            .generate(dir.path(), &dir.path().join("bom.json"))
            .unwrap_err();
        assert!(err.to_string().contains("was not found on PATH"));
    }

    #[cfg(unix)]
    #[test]
    fn test_flag_convention_runs_in_app_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("marker.txt"), "present").unwrap();
        let output = dir.path().join("bom.json");

        // $1 is the flag, $2 the output path; marker.txt is only visible
        // from the app directory.
        let generator = sh(
            "test \"$1\" = \"-o\" && cat marker.txt > \"$2\"",
            OutputConvention::Flag("-o".to_string()),
        );
        generator.generate(dir.path(), &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "present");
    }

    #[cfg(unix)]
    #[test]
    fn test_fixed_path_convention_moves_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("bom.json");

        let generator = sh(
            "mkdir -p target && printf '{}' > target/sbom.json",
            OutputConvention::FixedPath(PathBuf::from("target/sbom.json")),
        );
        generator.generate(dir.path(), &output).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "{}");
        assert!(!dir.path().join("target/sbom.json").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_fails() {
        let dir = TempDir::new().unwrap();
        let generator = sh("exit 3", OutputConvention::Flag("-o".to_string()));

        let err = generator
            .generate(dir.path(), &dir.path().join("bom.json"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::SbomGeneration { .. })
        ));
        assert!(err.to_string().contains("exited with"));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_without_output_file_fails() {
        let dir = TempDir::new().unwrap();
        let generator = sh("true", OutputConvention::Flag("-o".to_string()));

        let err = generator
            .generate(dir.path(), &dir.path().join("bom.json"))
            .unwrap_err();
        assert!(err.to_string().contains("produced no file"));
    }

    #[test]
    fn test_tool_name() {
        assert_eq!(
            CommandSbomGenerator::default().tool_name(),
            "npx @cyclonedx/bom"
        );
        assert_eq!(
            CommandSbomGenerator::new(SbomToolchain::Maven).tool_name(),
            "cyclonedx-maven-plugin"
        );
        assert_eq!(
            CommandSbomGenerator::new(SbomToolchain::Gradle).tool_name(),
            "cyclonedx-gradle-plugin"
        );
    }
}
