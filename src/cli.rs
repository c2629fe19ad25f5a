//! Command-line interface components.
//!
//! The converter runs with no arguments at all; every flag overrides one of
//! the fixed defaults in [`RegistryConfig`].

use crate::config::RegistryConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "iban_registry")]
#[command(about = "Convert the SWIFT IBAN Registry text release into a JSON registry and test fixtures")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Registry text release to read (defaults to iban-registry-100.txt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for the two JSON outputs (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of sample countries shown in the summary report
    #[arg(long, value_name = "COUNT")]
    pub samples: Option<usize>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the summary report and log errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Apply CLI overrides on top of the default configuration
    pub fn to_config(&self) -> RegistryConfig {
        let mut config = RegistryConfig::default();

        if let Some(input) = &self.input {
            config = config.with_input_path(input);
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if let Some(samples) = self.samples {
            config = config.with_sample_count(samples);
        }
        if self.quiet {
            config = config.without_report();
        }

        config
    }
}

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("iban_registry={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!("Logging initialized at level: {}", log_level);
}
