//! smartctl-collector - version 0.1.0
//!
//! Single-shot SMART temperature collector with tracing logging.
//! This is the main entry point that runs one collection cycle and handles
//! subcommands.

mod cli;
mod collector;
mod commands;
mod config;
mod smartctl;
mod startup_checks;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

use cli::{Args, Commands};
use commands::{command_check, command_config, command_generate_testdata, command_test};
use config::{resolve_config, show_config, validate_effective_config, Config};

/// Initializes the tracing subsystem with the configured log level.
///
/// Logs always go to stderr: stdout is reserved for the metric line, and a
/// scheduler collecting stdout must never see anything else on it.
fn setup_logging(config: &Config) {
    let level = match config.log_level.as_deref().unwrap_or("off") {
        "error" => LevelFilter::ERROR,
        "warn" => LevelFilter::WARN,
        "info" => LevelFilter::INFO,
        "debug" => LevelFilter::DEBUG,
        "trace" => LevelFilter::TRACE,
        _ => LevelFilter::OFF,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Runs one collection cycle under the scheduler contract: at most one line
/// on stdout, exit status always zero. Every failure is logged to stderr and
/// swallowed.
fn collect_once(args: &Args) {
    let config = match resolve_config(args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is config-driven and not yet available here
            eprintln!("smartctl-collector: failed to resolve configuration: {}", e);
            return;
        }
    };

    setup_logging(&config);

    if let Err(e) = validate_effective_config(&config) {
        warn!("No metric emitted, configuration invalid: {}", e);
        return;
    }

    match collector::collect_line(&config) {
        Ok(line) => println!("{line}"),
        Err(e) => debug!("No metric emitted: {}", e),
    }
}

/// Main application entry point.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.show_user_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        if args.show_config {
            return show_config(&config, args.config_format, false);
        }

        if args.show_user_config {
            return show_config(&config, args.config_format, true);
        }
    }

    // Handle subcommands
    if let Some(command) = &args.command {
        let config = load_validated_config(&args)?;
        setup_logging(&config);

        return match command {
            Commands::Check {
                binaries,
                device,
                all,
            } => command_check(*binaries, *device, *all, &config),

            Commands::Config {
                output,
                format,
                commented,
            } => command_config(output.clone(), format.clone(), *commented),

            Commands::Test {
                iterations,
                verbose,
            } => command_test(*iterations, *verbose, &config),

            Commands::GenerateTestdata {
                output,
                temperature,
            } => Ok(command_generate_testdata(output.clone(), *temperature)?),

            Commands::CheckRequirements => {
                println!("🔍 Checking Runtime Requirements");
                println!("================================\n");

                match startup_checks::validate_requirements(&config) {
                    Ok(_) => {
                        println!("\n✅ All requirements met - ready for scheduling");
                        std::process::exit(0);
                    }
                    Err(e) => {
                        eprintln!("\n❌ Requirements check failed: {}", e);
                        std::process::exit(1);
                    }
                }
            }
        };
    }

    collect_once(&args);
    Ok(())
}
