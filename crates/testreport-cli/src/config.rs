//! CLI configuration

use crate::commands::{Cli, RenderArgs};
use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use testreport::RenderOptions;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Derive verbosity from `-q` and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Default tracing filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Options passed to the renderer
    pub render: RenderOptions,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set render options
    #[must_use]
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Build configuration for a render invocation.
    ///
    /// Options from `--config` are applied first; explicit flags win.
    pub fn for_render(cli: &Cli, args: &RenderArgs) -> CliResult<Self> {
        let mut render = match &args.config {
            Some(path) => load_render_options(path)?,
            None => RenderOptions::default(),
        };
        if let Some(include) = &args.include {
            render.include = include.iter().copied().collect();
        }
        if args.device_details {
            render.include_device_details = true;
        }

        Ok(Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_render(render))
    }
}

/// Load render options from a YAML file
pub fn load_render_options(path: &Path) -> CliResult<RenderOptions> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::config(format!("cannot read {}: {e}", path.display()))
    })?;
    Ok(serde_yaml_ng::from_str(&text)?)
}
