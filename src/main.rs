mod cli;
mod converter;
mod error;
mod fmt;
mod mapper;
mod models;
mod qif;
mod reader;
mod settings;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Gl2qif {
            input,
            output,
            account_type,
            sheet,
            date_format,
            no_verify,
        } => cli::gl2qif::run(
            cli::gl2qif::Gl2QifArgs {
                input,
                output,
                account_type,
                sheet,
                date_format,
                no_verify,
            },
            settings::load_settings(),
        ),
        Commands::Config { init } => cli::config::run(init),
        Commands::Completions { shell } => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
