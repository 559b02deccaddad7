//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Casebook: browse and extract case studies from the terminal
#[derive(Parser, Debug)]
#[command(name = "casebook", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CASEBOOK_CONFIG")]
    pub config: Option<String>,

    /// Serve records from a JSON file instead of the remote store
    #[arg(long, global = true, value_name = "FILE")]
    pub source_file: Option<String>,

    /// Store base URL (overrides `store.url`)
    #[arg(long, global = true, env = "CASEBOOK_STORE_URL")]
    pub store_url: Option<String>,

    /// Store API key (overrides `store.api_key`)
    #[arg(long, global = true, env = "CASEBOOK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable debug logging for casebook crates
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a case study in the dialog and print it
    Show {
        /// Record id
        id: String,

        /// Seconds to wait for the fetch to settle
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Show a detail page by slug or id
    Detail {
        /// Stored slug, record id, or slug generated from the title
        key: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List case studies, newest first
    List {
        /// Only this category ("All" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over title, excerpt, author, category
        #[arg(long)]
        search: Option<String>,

        /// Keep entries carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Only entries created within this many days
        #[arg(long)]
        days: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Extract the dialog view model from a JSON record file
    Extract {
        /// File holding one record as JSON
        file: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        /// Config subcommand
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `casebook config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Write a default config file
    Init {
        /// Write here instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,

    /// Print one value by dotted key, e.g. `store.url`
    Get {
        /// Dotted key
        key: String,
    },
}
