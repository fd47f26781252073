//! CLI argument parsing and command definitions.
//!
//! One subcommand per fetch operation, plus configuration utilities.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "lorebook", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a content page and print the rendered HTML.
    Page {
        /// Franchise path segment of the current route.
        franchise: String,

        /// Page path, e.g. "example/intro".
        path: String,

        /// Print the full parsed document as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },

    /// Print the last-changed timestamp of a page.
    LastChanged {
        /// Page path, e.g. "example/intro".
        path: String,
    },

    /// Search operations.
    Search(SearchCommand),

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Search-specific subcommands.
#[derive(Parser, Debug)]
pub struct SearchCommand {
    /// Search subcommand to execute.
    #[command(subcommand)]
    pub command: SearchAction,
}

/// Available search subcommands.
#[derive(Subcommand, Debug)]
pub enum SearchAction {
    /// Search across all wikis.
    Wikis {
        /// Search text.
        query: String,
    },

    /// Search categories within a franchise.
    Category {
        /// Franchise path segment.
        franchise: String,

        /// Search text.
        query: String,
    },

    /// Search pages within a category of a franchise.
    Contents {
        /// Franchise path segment.
        franchise: String,

        /// Category name.
        category: String,

        /// Search text.
        query: String,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
