// src/cli/args.rs
use crate::domain::VoteDirection;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the question service, overrides the config file
    #[arg(short, long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// File holding the local vote record, overrides the config file
    #[arg(long, value_name = "VOTES_FILE", global = true)]
    pub votes_file: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List all topics
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List questions of a topic (default: the first topic)
    Questions {
        /// Topic slug
        #[arg(value_name = "SLUG")]
        slug: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Vote on a question; voting the same direction again withdraws the vote
    Vote {
        /// Topic slug the question belongs to
        #[arg(value_name = "SLUG")]
        slug: String,

        /// Question ID
        #[arg(value_name = "QUESTION_ID")]
        question_id: String,

        /// Vote direction
        #[arg(value_name = "DIRECTION")]
        direction: Direction,
    },

    /// Submit a new question
    Add {
        /// ID of the topic the question belongs to
        #[arg(long, value_name = "TAG_ID", default_value = "")]
        tag_id: String,

        /// Question text
        #[arg(short, long, value_name = "TEXT", default_value = "")]
        question: String,

        /// Answer text
        #[arg(short = 'A', long, value_name = "TEXT", default_value = "")]
        answer: String,
    },

    /// Show the votes recorded on this machine
    Votes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Target path (default: platform config directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for VoteDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => VoteDirection::Up,
            Direction::Down => VoteDirection::Down,
        }
    }
}
