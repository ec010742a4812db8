use crate::runtime::telemetry::DEFAULT_LOG_DIRECTIVE;
use anyhow::{bail, Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

const VALIDATE_ONLY_FLAG: &str = "--validate-only";
const LOG_LEVEL_FLAG: &str = "--log-level";

/// Options the execution harness reads from the rewritten command line.
///
/// Construct through [`RunConfig::builder`] or [`RunConfig::from_args`] so the values
/// are validated before the harness sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    program: String,
    config_file: PathBuf,
    output_file: Option<PathBuf>,
    validate_only: bool,
    log_directive: String,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Parses `<program> <config-file> [output-file] [--validate-only] [--log-level <d>]`.
    ///
    /// File names are kept as raw OS strings; only options and their values must be
    /// valid UTF-8.
    pub fn from_args(args: &[OsString]) -> Result<Self> {
        let mut tokens = args.iter();
        let mut builder = match tokens.next() {
            Some(program) => Self::builder().program(program.to_string_lossy()),
            None => Self::builder(),
        };
        let mut positionals: Vec<&OsStr> = Vec::new();

        while let Some(token) = tokens.next() {
            let Some(text) = token.to_str() else {
                positionals.push(token);
                continue;
            };
            if text == VALIDATE_ONLY_FLAG {
                builder = builder.validate_only(true);
            } else if text == LOG_LEVEL_FLAG {
                let directive = tokens
                    .next()
                    .with_context(|| format!("{LOG_LEVEL_FLAG} requires a value"))?;
                let directive = directive
                    .to_str()
                    .with_context(|| format!("{LOG_LEVEL_FLAG} value must be valid UTF-8"))?;
                builder = builder.log_directive(directive);
            } else if let Some(directive) = text.strip_prefix("--log-level=") {
                builder = builder.log_directive(directive);
            } else if text.starts_with("--") {
                bail!("unknown option {text}");
            } else {
                positionals.push(token);
            }
        }

        let mut positionals = positionals.into_iter();
        if let Some(config_file) = positionals.next() {
            builder = builder.config_file(config_file);
        }
        if let Some(output_file) = positionals.next() {
            builder = builder.output_file(output_file);
        }
        if let Some(extra) = positionals.next() {
            bail!("unexpected argument {}", extra.to_string_lossy());
        }

        builder.build()
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// JSON file holding the application configuration.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// File that receives log output instead of stdout.
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    /// Stop after a successful `configure`.
    pub fn validate_only(&self) -> bool {
        self.validate_only
    }

    pub fn log_directive(&self) -> &str {
        &self.log_directive
    }

    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            bail!("program cannot be empty");
        }
        if self.config_file.as_os_str().is_empty() {
            bail!("config_file cannot be empty");
        }
        if self.log_directive.trim().is_empty() {
            bail!("log_directive cannot be empty");
        }
        if self.output_file.as_deref() == Some(self.config_file.as_path()) {
            bail!("output_file must differ from config_file");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RunConfigBuilder {
    program: Option<String>,
    config_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    validate_only: Option<bool>,
    log_directive: Option<String>,
}

impl RunConfigBuilder {
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    pub fn validate_only(mut self, enabled: bool) -> Self {
        self.validate_only = Some(enabled);
        self
    }

    pub fn log_directive(mut self, directive: impl Into<String>) -> Self {
        self.log_directive = Some(directive.into());
        self
    }

    pub fn build(self) -> Result<RunConfig> {
        let config = RunConfig {
            program: self.program.context("program is required")?,
            config_file: self.config_file.context("config_file is required")?,
            output_file: self.output_file,
            validate_only: self.validate_only.unwrap_or(false),
            log_directive: self
                .log_directive
                .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_owned()),
        };
        config.validate()?;
        Ok(config)
    }
}
