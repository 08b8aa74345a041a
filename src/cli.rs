use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "ladder-board: rankings, match log and rating trends")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Show the tiered player ranking
    Rankings,
    /// Show the match log, most recent first
    Matches {
        /// Show match ids for deletion
        #[arg(short, long)]
        delete: bool,
    },
    /// Show a player's profile and rating trend
    Profile {
        /// Player id
        id: String,
    },
    /// Show how often each player beat each other player
    HeadToHead,
    /// Register a new player
    AddPlayer {
        /// Display name
        name: String,
    },
    /// Rename a player or change their active flag
    EditPlayer {
        /// Player id
        id: String,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// Whether the player is still active (true/false)
        #[arg(short, long)]
        active: Option<bool>,
    },
    /// Delete a player and all of their matches after confirmation
    RemovePlayer {
        /// Player id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Record a match result
    Submit {
        /// Winner's player id
        winner: String,
        /// Loser's player id
        loser: String,
        /// Record the match as a draw
        #[arg(long)]
        draw: bool,
    },
    /// Delete a match after confirmation
    DeleteMatch {
        /// Match id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Serve the derived views as JSON
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
