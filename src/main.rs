use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use scraping_utils::fs_util::write_if_changed;
use yale_football_calendar::{config::Config, logger::LogFacade, pipeline::update_calendar};

#[derive(Parser)]
struct Opts {
    /// Where to write the calendar; `-` writes to stdout.
    #[arg(default_value = "yale_football.ics")]
    output_path: PathBuf,
    /// TOML file overriding the built-in settings.
    #[arg(long = "config", value_name = "TOML")]
    config_path: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();

    let opts = Opts::parse();
    let config = Config::load(opts.config_path.as_deref())?;

    let calendar = update_calendar(&config, &LogFacade)
        .await
        .context("Calendar update failed; the existing calendar was left untouched")?;
    let ics = calendar.to_ics();

    if opts.output_path.as_os_str() == "-" {
        print!("{ics}");
    } else if write_if_changed(&opts.output_path, ics.as_bytes())? {
        info!("Calendar written to {:?}.", opts.output_path);
    } else {
        info!("Calendar at {:?} is already up to date.", opts.output_path);
    }
    Ok(())
}
