use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::application::{DEFAULT_OUTPUT_PATH, DEFAULT_REQUIREMENTS_PATH};
use crate::domain::DictionaryFormat;

pub const DEFAULT_DICTIONARY_NAME: &str = "data-science-en";

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a spell-checker dictionary from a requirements file
    Generate {
        #[arg(short, long, default_value = DEFAULT_REQUIREMENTS_PATH)]
        requirements: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Output format; inferred from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<DictionaryFormatArg>,

        /// Split identifiers into words (`read_csv` -> `read`, `csv`)
        #[arg(long)]
        split: bool,

        /// Keep duplicate words
        #[arg(long)]
        no_dedupe: bool,

        /// Drop words shorter than this
        #[arg(long, default_value = "1")]
        min_length: usize,

        /// Word list whose entries are left out of the dictionary (repeatable)
        #[arg(short = 'x', long)]
        exclude: Vec<PathBuf>,

        /// Print the words instead of writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// List the libraries read from a requirements file
    Libraries {
        #[arg(short, long, default_value = DEFAULT_REQUIREMENTS_PATH)]
        requirements: PathBuf,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the terms a single installed library contributes
    Inspect {
        library: String,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the VS Code settings that register the dictionary with Code Spell Checker
    Settings {
        #[arg(long, default_value = DEFAULT_DICTIONARY_NAME)]
        name: String,

        /// Dictionary path relative to the workspace folder, or an absolute path
        #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
        path: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DictionaryFormatArg {
    Text,
    Cspell,
}

impl From<DictionaryFormatArg> for DictionaryFormat {
    fn from(arg: DictionaryFormatArg) -> Self {
        match arg {
            DictionaryFormatArg::Text => DictionaryFormat::Text,
            DictionaryFormatArg::Cspell => DictionaryFormat::CSpell,
        }
    }
}
