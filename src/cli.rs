use crate::config::Config;
use crate::manager;
use crate::utils::error::AppResult;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contactdeck")]
#[command(about = "Browse, search and manage an address book in the terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "JSON dataset to load instead of the bundled one")]
    pub data: Option<PathBuf>,

    #[arg(short, long)]
    pub debug: bool,

    #[arg(long, value_name = "FILE", help = "Write logs to a file instead of stderr")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Everything a command handler needs besides its own arguments
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub data_file: Option<PathBuf>,
}

impl Commands {
    pub fn execute(self, ctx: Context) -> AppResult<()> {
        match self {
            Commands::Browse => manager::handle_browse_command(ctx)?,
            Commands::List(args) => manager::handle_list_command(ctx, &args)?,
            Commands::Show(args) => manager::handle_show_command(ctx, &args)?,
            Commands::Tags => manager::handle_tags_command(ctx)?,
            Commands::Config(args) => manager::handle_config_command(ctx, args.command)?,
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive contact browser (default)
    Browse,

    /// Print one page of contacts
    List(ListArgs),

    /// Show a contact's details
    Show(ShowArgs),

    /// List tags with how many contacts carry each
    Tags,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(short = 'q', long, help = "Match name, email or phone")]
    pub query: Option<String>,

    #[arg(short, long, help = "Only contacts carrying this tag")]
    pub tag: Option<String>,

    #[arg(short, long, help = "name, email, tags, address or relation")]
    pub sort: Option<String>,

    #[arg(long, help = "Sort descending")]
    pub desc: bool,

    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    #[arg(short = 'n', long, help = "Contacts per page (10, 25, 50 or 100)")]
    pub page_size: Option<usize>,

    #[arg(short, long)]
    pub format: Option<ListFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(help = "Contact id or name")]
    pub identifier: String,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ListFormat {
    Table,
    Grid,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}
