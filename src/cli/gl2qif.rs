use std::path::PathBuf;

use colored::Colorize;

use crate::converter::{gl_to_qif, ConvertOptions, ConvertResult};
use crate::error::{ConvError, Result};
use crate::fmt::money;
use crate::models::AccountType;
use crate::settings::Settings;

pub struct Gl2QifArgs {
    pub input: String,
    pub output: String,
    pub account_type: Option<AccountType>,
    pub sheet: Option<String>,
    pub date_format: Option<String>,
    pub no_verify: bool,
}

/// Merge command-line arguments over settings.
pub fn resolve_options(args: &Gl2QifArgs, settings: Settings) -> Result<ConvertOptions> {
    let account_type = match args.account_type {
        Some(t) => t,
        None => settings
            .account_type
            .parse()
            .map_err(|e: crate::models::ParseAccountTypeError| ConvError::Settings(e.to_string()))?,
    };
    Ok(ConvertOptions {
        account_type,
        date_format: args.date_format.clone().unwrap_or(settings.date_format),
        sheet: args.sheet.clone().or(settings.sheet),
        verify_balance: settings.verify_balance && !args.no_verify,
        layout: settings.layout,
    })
}

pub fn run(args: Gl2QifArgs, settings: Settings) -> Result<()> {
    let opts = resolve_options(&args, settings)?;
    let input = PathBuf::from(&args.input);
    let output = PathBuf::from(&args.output);

    let result = gl_to_qif(&input, &output, &opts)?;

    println!(
        "{}",
        format!("Successfully converted {} to {}", input.display(), output.display()).green()
    );
    println!("{}", summary_line(&result));
    Ok(())
}

fn summary_line(result: &ConvertResult) -> String {
    let closing = result
        .closing_balance
        .map(money)
        .unwrap_or_else(|| format!("(not found, calculated {})", money(result.calculated_balance)));
    format!(
        "Period: {}, Opening Balance: {}, Closing Balance: {}, Records: {}",
        result.period.as_deref().unwrap_or("(unknown)"),
        money(result.opening_balance),
        closing,
        result.records
    )
}
