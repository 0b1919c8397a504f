//! Command-line front end for the SmartCalc engine
//!
//! Parses subcommands, loads conditions from YAML, calls into
//! `smartcalc_core` and renders results as text or JSON.

#![warn(clippy::all)]

pub mod commands;
pub mod format;
pub mod input;
mod logging;

pub use commands::{Command, run};
pub use logging::{LOG_FILE, LogRotation, init_logging};
