//! CLI command implementations for smartctl-collector.
//!
//! This module provides implementations for all CLI subcommands:
//! - `check`: System validation
//! - `config`: Configuration file generation
//! - `test`: Collection pipeline testing
//! - `generate`: Test data generation

pub mod check;
pub mod config;
pub mod generate;
pub mod test;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
pub use generate::command_generate_testdata;
pub use test::command_test;
