use clap::Parser;

mod cli;
mod command;
mod config;
mod detector;
mod error;
mod generator;
mod report;
mod result;
mod rules;
mod scanner;
mod schema;

use crate::result::Result;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("authmigrate")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = cli::Args::parse();

    initialize_logger(cli_args.debug)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match &cli_args.command {
            cli::Command::Analyze { path } => {
                command::analyze::execute(&cli_args, path).await
            }
            cli::Command::Migrate {
                path,
                output,
                dry_run,
            } => {
                command::migrate::execute(
                    &cli_args,
                    path,
                    output.as_deref(),
                    *dry_run,
                )
                .await
            }
        }
    })
}
