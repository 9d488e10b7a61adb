use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::find::{FindOptions, GlobName, Matcher, RegexName, RegexPath};

const EXAMPLES: &str = "\
Examples:
  treefind src -p '*.rs'                 Rust files anywhere under src
  treefind . -p '*.toml' -d 0            TOML files directly inside .
  treefind . -m regex-path -p 'tests/.*\\.rs$'
  treefind . -m regex-name -p '^mod' -t all";

/// How the pattern is applied to each entry.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Shell glob against the base name
    Glob,
    /// Regular expression against the path relative to ROOT
    RegexPath,
    /// Regular expression against the base name
    RegexName,
}

impl Mode {
    pub fn matcher(self) -> Box<dyn Matcher> {
        match self {
            Mode::Glob => Box::new(GlobName::new()),
            Mode::RegexPath => Box::new(RegexPath::new()),
            Mode::RegexName => Box::new(RegexName::new()),
        }
    }
}

/// Which kinds of entries may match.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    Dir,
    All,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "treefind",
    version,
    about = "Find files and directories by name or path pattern",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Directory to search, or a single file to test (default: current directory)
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Pattern to match, interpreted according to --mode
    #[arg(short = 'p', long = "pattern", default_value = "*")]
    pub pattern: String,

    /// Matching mode
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Glob)]
    pub mode: Mode,

    /// Max depth below ROOT (0 = direct children only, negative = unlimited)
    #[arg(short = 'd', long = "max-depth", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Kinds of entries to report
    #[arg(short = 't', long = "type", value_enum, default_value_t = EntryType::File)]
    pub entry_type: EntryType,

    /// Separate results with NUL instead of newline
    #[arg(short = '0', long = "print0")]
    pub print0: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        self
    }

    pub fn find_options(&self) -> FindOptions {
        let options = FindOptions::new()
            .with_files(matches!(self.entry_type, EntryType::File | EntryType::All))
            .with_dirs(matches!(self.entry_type, EntryType::Dir | EntryType::All));
        match self.max_depth {
            Some(depth) => options.with_signed_depth(depth),
            None => options,
        }
    }
}
