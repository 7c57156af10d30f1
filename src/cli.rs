//! CLI arguments and subcommands for smartctl-collector.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "smartctl-collector",
    about = "Single-shot SMART temperature collector emitting InfluxDB line protocol",
    long_about = "Single-shot SMART temperature collector emitting InfluxDB line protocol.\n\n\
                  Invokes smartctl against one disk, extracts the temperature and device \
                  identity, and prints a single line protocol record to stdout. Intended \
                  to be run periodically by cron or a telegraf exec input; failures are \
                  silent and the collection run always exits 0.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true,
    after_help = "Project: https://github.com/cansp-dev/smartctl-collector — More info: https://www.herakles.now — Support: exporter@herakles.now"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Device path to query (a stable /dev/disk/by-id symlink is recommended)
    #[arg(short = 'd', long)]
    pub device: Option<String>,

    /// Path to the smartctl binary
    #[arg(long)]
    pub smartctl_path: Option<PathBuf>,

    /// Path to the sudo binary used for non-interactive escalation
    #[arg(long)]
    pub sudo_path: Option<PathBuf>,

    /// Transport type passed to smartctl via -d (e.g. "sat")
    #[arg(long)]
    pub device_type: Option<String>,

    /// Value of the fixed "type" tag attached to the emitted record
    #[arg(long)]
    pub type_tag: Option<String>,

    /// Invoke smartctl directly, without the sudo wrapper
    #[arg(long)]
    pub no_sudo: bool,

    /// Log level (logs go to stderr; stdout carries only the metric line)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print only the loaded user config file + full path and exit
    #[arg(long)]
    pub show_user_config: bool,

    /// Output format for --show-config*
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Path to a JSON report file (reads the report from the file instead of invoking smartctl)
    #[arg(short = 't', long)]
    pub test_data_file: Option<PathBuf>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and system requirements
    Check {
        /// Check smartctl and sudo binaries
        #[arg(long)]
        binaries: bool,

        /// Check the device path
        #[arg(long)]
        device: bool,

        /// Check all system requirements
        #[arg(long)]
        all: bool,
    },

    /// Generate configuration files
    Config {
        /// Output file path
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },

    /// Test the collection pipeline and display results
    Test {
        /// Number of test iterations
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,

        /// Show the full parsed report details
        #[arg(long)]
        verbose: bool,
    },

    /// Generate a synthetic smartctl JSON report file
    GenerateTestdata {
        /// Output file path
        #[arg(short = 'o', long, default_value = "testdata.json")]
        output: PathBuf,

        /// Fixed temperature in Celsius (random 25-55 when omitted)
        #[arg(long)]
        temperature: Option<i64>,
    },

    /// Check runtime requirements and permissions
    CheckRequirements,
}
