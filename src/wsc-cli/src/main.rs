//! worldscope binary entry point

mod cli;
mod config;
mod output;

use std::io;
use std::io::Write;
use std::process;

use wsc_core::{apply_filter, latest_year_slice, Dataset};

use crate::cli::{parse_args, Commands};
use crate::config::Config;
use crate::output::write_table;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = parse_args();

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_cli(&args);

    let dataset = Dataset::new(config.dataset.clone());
    let mut stdout = io::stdout().lock();

    match &args.command {
        Commands::Load => {
            let table = dataset.load().await?;
            write_table(&table, args.output_format, &mut stdout)?;
        }
        Commands::Filter(filter_args) => {
            let table = dataset.load().await?;
            let view = apply_filter(&table, &filter_args.to_params())?;
            log::info!("{} of {} rows match", view.height(), table.height());
            write_table(&view, args.output_format, &mut stdout)?;
        }
        Commands::Map(filter_args) => {
            let table = dataset.load().await?;
            let view = apply_filter(&table, &filter_args.to_params())?;
            let latest = latest_year_slice(&view)?;
            write_table(&latest, args.output_format, &mut stdout)?;
        }
        Commands::Config => {
            let rendered = config.to_toml()?;
            write!(stdout, "{rendered}")?;
        }
    }

    Ok(())
}
