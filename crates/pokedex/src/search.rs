use anyhow::Result;
use clap::Args;
use colored::Colorize;
use indicatif::ProgressBar;

use pokedex_api::PokeApiClient;
use pokedex_core::record::{format_dex_id, title_case};
use pokedex_core::{filter_records, normalize, CatalogLoader};

use crate::list::{print_json, OutputFormat};

#[derive(Args, Debug)]
#[command(about = "Search the full catalog by name or number")]
pub struct SearchArgs {
    /// Name fragment or exact dex number
    pub query: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: SearchArgs) -> Result<()> {
    let client = PokeApiClient::new()?;
    let mut loader = CatalogLoader::new(client);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message("Fetching catalog...");
    let result = loader.load_all();
    spinner.finish_and_clear();
    result?;

    let query = normalize(&args.query);
    let matches = filter_records(loader.items(), &query);

    match args.format {
        OutputFormat::Human => {
            if matches.is_empty() {
                println!("No matches for \"{}\"", args.query);
                return Ok(());
            }
            for record in &matches {
                println!(
                    "{} {}",
                    format_dex_id(record.id).dimmed(),
                    title_case(&record.name).green()
                );
            }
        }
        OutputFormat::Json => print_json(&matches)?,
    }
    Ok(())
}
