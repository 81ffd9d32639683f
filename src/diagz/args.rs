use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "diagz", version)]
#[command(about = "Browse, search and annotate a diagram gallery", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Registry root (directory or http(s) URL), overrides configuration
    #[arg(short, long, global = true)]
    pub root: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List diagrams grouped by category
    #[command(alias = "ls")]
    List {
        /// Only show diagrams whose id, name or category contains this
        #[arg(short, long)]
        search: Option<String>,

        /// Print the catalog as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Search diagrams by id, name or category
    Search { term: String },

    /// Show details for one diagram
    #[command(alias = "v")]
    View { id: String },

    /// Set the description shown for a diagram
    #[command(alias = "d")]
    Describe {
        id: String,

        /// Description text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Download the diagram image
    #[command(alias = "dl")]
    Download {
        id: String,

        /// Version tag to fetch instead of the current one (e.g. v3)
        #[arg(long)]
        version: Option<String>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open the diagram image in the system viewer
    #[command(alias = "o")]
    Open {
        id: String,

        /// Version tag to open instead of the current one
        #[arg(long)]
        version: Option<String>,
    },

    /// Show which catalog source is in use
    Source,
}
