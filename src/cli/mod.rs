pub mod completions;
pub mod config;
pub mod gl2qif;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::models::AccountType;

#[derive(Parser)]
#[command(
    name = "frontacc-conv",
    version,
    about = "Convert FrontAccounting GL account transaction exports to QIF."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an Excel GL account transactions report to a QIF file.
    Gl2qif {
        /// Path to the .xls/.xlsx GL report
        input: String,
        /// Path of the QIF file to write
        output: String,
        /// QIF account type: Bank, Cash, CCard, Invst, Oth A, Oth L (default: Bank)
        account_type: Option<AccountType>,
        /// Worksheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
        /// strftime pattern for QIF dates (default: %m/%d/%Y)
        #[arg(long = "date-format")]
        date_format: Option<String>,
        /// Skip checking the computed balance against the report's closing balance
        #[arg(long = "no-verify")]
        no_verify: bool,
    },
    /// Show the settings file location and effective settings.
    Config {
        /// Write a settings file with default values if none exists
        #[arg(long)]
        init: bool,
    },
    /// Print a shell completion script.
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// RUST_LOG always takes precedence; --verbose falls back to DEBUG, otherwise WARN.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(filter)
        .try_init();
}
