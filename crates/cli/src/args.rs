//! CLI argument definitions.
//!
//! Uses clap derive macros both for the process arguments and for each
//! command typed into the interactive session.

use clap::{Args, Parser, Subcommand};
use domain::{FilterCriteria, University};

use common::config::ENV_ALLOWED_DOMAINS;

/// Registrar - register university users from the terminal
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print listings and errors as JSON
    #[arg(long)]
    pub json: bool,

    /// Comma separated email domains accepted at registration
    #[arg(long, env = ENV_ALLOWED_DOMAINS)]
    pub allowed_domains: Option<String>,
}

/// One line typed into the session
#[derive(Parser, Debug)]
#[command(name = "registrar", no_binary_name = true)]
#[command(disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Commands available inside the session
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Register a new user (prompts for each field)
    Add,

    /// Show registered users, optionally filtered
    List(ListArgs),

    /// Delete the user at a table index
    Delete {
        /// Index shown in the first column of `list`
        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Show selectable universities
    Universities,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Filter flags of the list command
#[derive(Args, Debug, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// First name contains (case-insensitive)
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name contains (case-insensitive)
    #[arg(long)]
    pub last_name: Option<String>,

    /// Email contains (case-insensitive)
    #[arg(long)]
    pub email: Option<String>,

    /// Exact university: slug (`yale-university`) or quoted label (`"Yale University"`)
    #[arg(long)]
    pub university: Option<University>,
}

impl From<ListArgs> for FilterCriteria {
    fn from(args: ListArgs) -> Self {
        FilterCriteria::new()
            .first_name(args.first_name.unwrap_or_default())
            .last_name(args.last_name.unwrap_or_default())
            .email(args.email.unwrap_or_default())
            .university(args.university)
    }
}

impl SessionLine {
    /// Parse a typed line into a command
    pub fn parse_line(line: &str) -> Result<SessionCommand, clap::Error> {
        SessionLine::try_parse_from(split_words(line)).map(|parsed| parsed.command)
    }
}

/// Split a line on whitespace, keeping double-quoted runs together.
///
/// An unterminated quote runs to the end of the line. Single quotes are
/// ordinary characters so names like `O'Brien` need no escaping.
fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(word);
    }
    words
}
