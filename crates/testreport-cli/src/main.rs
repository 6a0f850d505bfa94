//! testreport CLI: render test reports for CI
//!
//! ## Usage
//!
//! ```bash
//! testreport render --input report.json                 # Merged rows, all statuses
//! testreport render -i report.json --include failed     # Failures only
//! testreport render -i report.json --device-details     # One row per device run
//! testreport render -i report.json --config render.yaml -o out.json
//! ```

use clap::Parser;
use std::process::ExitCode;
use testreport_cli::{logging, Cli, CliConfig, CliResult, Commands, RenderRunner};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render(args) => {
            let config = CliConfig::for_render(&cli, args)?;
            logging::init(config.verbosity);
            tracing::debug!(?config, "resolved configuration");
            RenderRunner::new(config).run(args)
        }
    }
}
