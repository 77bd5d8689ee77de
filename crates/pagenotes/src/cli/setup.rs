use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pagenotes",
    bin_name = "pagenotes",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Attach notes to the page you are reading", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the note storage file
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a note for a page
    #[command(alias = "a")]
    Add {
        /// Note text (HTML tags are stripped)
        content: String,

        /// Page URL
        #[arg(long)]
        url: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// List the notes of a page, newest first
    #[command(alias = "ls")]
    List {
        /// Page URL
        #[arg(long)]
        url: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replace the text of a note
    Edit {
        /// Note id, as shown by `list`
        id: String,

        /// New note text
        content: String,

        /// Page URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id, as shown by `list`
        id: String,

        /// Page URL
        #[arg(long)]
        url: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search the notes of a page by content or title
    Search {
        /// Case-insensitive text to look for
        query: String,

        /// Page URL
        #[arg(long)]
        url: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}
