//! Render command execution

use crate::commands::RenderArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use std::io::{Read, Write};
use std::path::Path;
use testreport::{Formatter, JsonFormatter, Report};

/// Read, render and write one report
#[derive(Debug)]
pub struct RenderRunner {
    config: CliConfig,
    formatter: JsonFormatter,
}

impl RenderRunner {
    /// Create a runner for the given configuration
    #[must_use]
    pub const fn new(config: CliConfig) -> Self {
        Self {
            config,
            formatter: JsonFormatter::new(),
        }
    }

    /// Render a report document held in memory
    pub fn render_str(&self, input: &str) -> CliResult<String> {
        let report = Report::from_json(input)?;
        tracing::info!(modules = report.modules().len(), "loaded report");
        Ok(self.formatter.format(&report, &self.config.render)?)
    }

    /// Execute the render command
    pub fn run(&self, args: &RenderArgs) -> CliResult<()> {
        let input = read_input(&args.input)?;
        let rendered = self.render_str(&input)?;

        match &args.output {
            Some(path) => {
                std::fs::write(path, format!("{rendered}\n"))?;
                tracing::info!(path = %path.display(), "wrote rendered report");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{rendered}")?;
            }
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
