use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "courtside analytics backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch a date's games and play-by-play from CBBD into the cache
    Ingest {
        /// Slate date as YYYY-MM-DD (optional, defaults to yesterday US Eastern)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Analyze cached play-by-play and store the results in the database
    Process {
        /// Slate date as YYYY-MM-DD (optional, defaults to yesterday US Eastern)
        #[arg(short, long)]
        date: Option<String>,
    },
}
