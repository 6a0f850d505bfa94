//! CLI command definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use testreport::TestStatus;

/// testreport: render test-execution reports as canonical JSON
#[derive(Parser, Debug)]
#[command(name = "testreport")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a report document as canonical JSON
    Render(RenderArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Report JSON to read ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Statuses to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',', value_parser = parse_status)]
    pub include: Option<Vec<TestStatus>>,

    /// Render one row per device execution instead of one merged row per test
    #[arg(long)]
    pub device_details: bool,

    /// YAML file with render options (include, includeDeviceDetails)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_status(value: &str) -> Result<TestStatus, String> {
    value.trim().parse().map_err(|e: testreport::ReportError| {
        let known: Vec<&str> = TestStatus::ALL.iter().map(TestStatus::as_str).collect();
        format!("{e} (expected one of: {})", known.join(", "))
    })
}
