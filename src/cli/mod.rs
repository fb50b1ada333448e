use crate::constants::{APP_DESCRIPTION, APP_NAME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::errors::AppResult;
use crate::journal_core::{format_entry_date, parse_entry_date, Mood};
use clap::{Args, Parser, Subcommand};

/// A tiny local mood journal
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION)]
#[command(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Log in with a display name
    Login {
        /// Name shown in greetings
        name: String,
    },
    /// Log out; erases every entry
    Logout,
    /// Show who is logged in
    Whoami,
    /// Write a new entry
    Add(AddArgs),
    /// Replace parts of an existing entry
    Edit(EditArgs),
    /// Delete an entry
    Delete {
        /// Id of the entry to delete
        id: String,
    },
    /// List entries grouped by date, newest first
    List,
    /// Show mood and entry frequency statistics
    Stats,
}

#[derive(Args, Debug, PartialEq)]
pub struct AddArgs {
    /// Entry text
    #[arg(short = 't', long, default_value = "")]
    pub text: String,

    /// Mood name or emoji (happy, sad, angry, tired, excited, celebrating, neutral)
    #[arg(short = 'm', long, default_value_t = Mood::Happy, value_parser = parse_mood_arg)]
    pub mood: Mood,

    /// Local URI of a photo to attach
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Entry date (MM/DD/YYYY); defaults to today
    #[arg(short = 'd', long, value_parser = parse_date_arg)]
    pub date: Option<String>,
}

#[derive(Args, Debug, PartialEq)]
pub struct EditArgs {
    /// Id of the entry to edit
    pub id: String,

    /// New entry text
    #[arg(short = 't', long)]
    pub text: Option<String>,

    /// New mood name or emoji
    #[arg(short = 'm', long, value_parser = parse_mood_arg)]
    pub mood: Option<Mood>,

    /// New photo URI
    #[arg(short = 'i', long, conflicts_with = "clear_image")]
    pub image: Option<String>,

    /// Remove the attached photo
    #[arg(long)]
    pub clear_image: bool,

    /// New entry date (MM/DD/YYYY)
    #[arg(short = 'd', long, value_parser = parse_date_arg)]
    pub date: Option<String>,
}

/// Accepts a catalogue mood name or emoji; anything else is rejected.
fn parse_mood_arg(raw: &str) -> AppResult<Mood> {
    raw.parse()
}

/// Accepts a date argument and normalizes it to zero-padded `MM/DD/YYYY`.
fn parse_date_arg(raw: &str) -> AppResult<String> {
    parse_entry_date(raw).map(format_entry_date)
}
