use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
#[command(about = "Open the interactive catalog browser")]
pub struct BrowseArgs {}

pub fn execute(_args: BrowseArgs) -> Result<()> {
    pokedex_tui::run()
}
