use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::ProgressBar;

use pokedex_api::PokeApiClient;
use pokedex_core::record::{format_dex_id, title_case};
use pokedex_core::{CatalogLoader, DisplayRecord};

#[derive(Args, Debug)]
#[command(about = "List catalog entries")]
pub struct ListArgs {
    /// Fetch the whole catalog instead of the first page
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

pub fn execute(args: ListArgs) -> Result<()> {
    let client = PokeApiClient::new()?;
    let mut loader = CatalogLoader::new(client);

    if args.all {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Fetching catalog...");
        let result = loader.load_all();
        spinner.finish_and_clear();
        result?;
    } else {
        loader.load_more()?;
    }

    match args.format {
        OutputFormat::Human => print_human(loader.items()),
        OutputFormat::Json => print_json(loader.items())?,
    }
    Ok(())
}

fn print_human(items: &[DisplayRecord]) {
    for record in items {
        println!(
            "{} {}",
            format_dex_id(record.id).dimmed(),
            title_case(&record.name).green()
        );
    }
}

pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
