//! Command-line front end.
//!
//! Parses arguments with clap and drives an [`App`](crate::App). Output is
//! plain text on stdout; logs go to stderr.

mod commands;

pub use commands::run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "market-intel",
    version,
    about = "AI market intelligence reports for any sector"
)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a sector and print the report.
    Search {
        /// Sector keyword, e.g. "AI for Energy Efficiency".
        #[arg(required = true)]
        sector: Vec<String>,

        /// Copy the report to the clipboard.
        #[arg(long, default_value_t = false)]
        copy: bool,

        /// Save the report as a Markdown file.
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Directory for --save. Defaults to the configured export directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List past searches.
    History {
        /// Page to show (1-based).
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Entries per page. Defaults to the configured page size.
        #[arg(long)]
        per_page: Option<usize>,

        /// Select an entry and show its summary.
        #[arg(long)]
        select: Option<String>,
    },
    /// Print the full report of a past search.
    Show {
        /// History entry id.
        id: String,
    },
    /// Export a past search.
    Export {
        /// History entry id.
        id: String,

        /// Copy the report to the clipboard instead of writing a file.
        #[arg(long, default_value_t = false)]
        copy: bool,

        /// Output directory. Defaults to the configured export directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove a past search.
    Remove {
        /// History entry id.
        id: String,
    },
    /// Remove all past searches.
    Clear,
    /// Work with the history stored on the backend.
    Remote {
        #[command(subcommand)]
        command: RemoteCommand,
    },
    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum RemoteCommand {
    /// List one page of the backend history.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Print the report of a backend history entry.
    Show { id: String },
    /// Delete a backend history entry.
    Remove { id: String },
    /// Delete the whole backend history.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_joins_words() {
        let cli = Cli::parse_from(["market-intel", "search", "AI", "for", "Energy", "--copy"]);
        match cli.command {
            Command::Search { sector, copy, save, .. } => {
                assert_eq!(sector.join(" "), "AI for Energy");
                assert!(copy);
                assert!(!save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_history_defaults() {
        let cli = Cli::parse_from(["market-intel", "--config", "c.toml", "history"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        match cli.command {
            Command::History { page, per_page, select } => {
                assert_eq!(page, 1);
                assert_eq!(per_page, None);
                assert_eq!(select, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_remote_list() {
        let cli = Cli::parse_from(["market-intel", "remote", "list", "--page", "3"]);
        assert!(matches!(
            cli.command,
            Command::Remote {
                command: RemoteCommand::List { page: 3, per_page: 10 }
            }
        ));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
