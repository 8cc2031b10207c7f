use anyhow::Result;
use clap::Args;
use colored::Colorize;

use pokedex_api::PokeApiClient;
use pokedex_core::record::{format_dex_id, title_case};
use pokedex_core::FullRecord;

use crate::list::{print_json, OutputFormat};

#[derive(Args, Debug)]
#[command(about = "Show the full entry for one id or name")]
pub struct ShowArgs {
    /// Dex number or name, e.g. "25" or "pikachu"
    pub key: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(args: ShowArgs) -> Result<()> {
    let client = PokeApiClient::new()?;
    let record = client.fetch_detail(&args.key.to_lowercase())?;

    match args.format {
        OutputFormat::Human => print_human(&record),
        OutputFormat::Json => print_json(&record)?,
    }
    Ok(())
}

fn print_human(record: &FullRecord) {
    println!(
        "{} {}",
        title_case(&record.name).green().bold(),
        format_dex_id(record.id).dimmed()
    );

    let types: Vec<String> = record.types.iter().map(|t| title_case(&t.type_name)).collect();
    println!("  {} {}", "Types: ".dimmed(), types.join(", "));
    println!("  {} {:.1} m", "Height:".dimmed(), record.height_m());
    println!("  {} {:.1} kg", "Weight:".dimmed(), record.weight_kg());
    println!(
        "  {} {}",
        "Art:   ".dimmed(),
        pokedex_api::artwork_url(record.id).dimmed()
    );

    println!("  {}", "Stats:".dimmed());
    for stat in &record.stats {
        println!(
            "    {:<16} {}",
            stat.stat_name.dimmed(),
            stat.base_stat.to_string().yellow()
        );
    }
}
