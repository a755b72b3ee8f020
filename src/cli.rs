use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::i18n::Language;

#[derive(Parser, Debug)]
#[command(author, version, about = "Personalised food analysis and nutrition advice", long_about = None)]
pub struct Cli {
    /// Path to a JSON health profile (form defaults when omitted)
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Language for prompts and output
    #[arg(short, long, global = true, value_enum)]
    pub lang: Option<Language>,

    /// CSV file replacing the built-in alternatives catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse a meal photo with the model
    Analyze {
        /// Path to the meal image
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Write the analysed record as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and score a saved model reply without calling the model
    Evaluate {
        /// Text file holding the model's reply
        #[arg(short, long)]
        response: PathBuf,
    },
    /// Interactive nutrition chat
    Chat {
        /// JSON record from a previous `analyze --output`
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// Answer from canned advice only, without calling the model
        #[arg(long)]
        offline: bool,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
