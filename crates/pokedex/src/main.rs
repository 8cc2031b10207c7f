use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod browse;
mod list;
mod search;
mod show;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse and search the Pokedex catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive catalog browser (default)
    #[command(alias = "b")]
    Browse(browse::BrowseArgs),

    /// List catalog entries
    #[command(alias = "ls")]
    List(list::ListArgs),

    /// Search the full catalog by name or number
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Show the full entry for one id or name
    Show(show::ShowArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG still wins
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        None => browse::execute(browse::BrowseArgs {}),
        Some(Commands::Browse(args)) => browse::execute(args),
        Some(Commands::List(args)) => list::execute(args),
        Some(Commands::Search(args)) => search::execute(args),
        Some(Commands::Show(args)) => show::execute(args),
    }
}
