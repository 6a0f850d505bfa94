//! testreport CLI Library
//!
//! Command-line wrapper around the `testreport` renderer: reads a report
//! document, applies render options from flags or a YAML file, and writes
//! the canonical JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::{Cli, Commands, RenderArgs};
pub use config::{load_render_options, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::RenderRunner;
