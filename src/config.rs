use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use crate::loader::MessageFilter;

pub const DEFAULT_ARCHIVE: &str = "./minecraft.jar";
pub const DEFAULT_ENTRY: &str = "assets/minecraft/lang/en_us.json";
pub const DEFAULT_PREFIX: &str = "death.";
pub const DEFAULT_IGNORE_KEYS: &str = "death.attack.badRespawnPoint.link";

/// How extracted messages are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One message per line
    Raw,
    /// A single alternation pattern
    Pattern,
}

/// Settings for one run, built once from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub archive: PathBuf,
    pub entry: String,
    pub mode: OutputMode,
    pub filter: MessageFilter,
    /// Escape regex metacharacters found in message text
    pub escape: bool,
    pub verbosity: u8,
}

impl Config {
    pub fn new(archive: impl Into<PathBuf>, entry: &str, filter: MessageFilter) -> Self {
        Config {
            archive: archive.into(),
            entry: entry.to_string(),
            mode: OutputMode::Pattern,
            filter,
            escape: false,
            verbosity: 0,
        }
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        // Every option below has a default value, so lookups cannot miss
        let value = |id: &str| {
            matches
                .get_one::<String>(id)
                .map(String::as_str)
                .unwrap_or_default()
        };
        let archive = matches
            .get_one::<PathBuf>("mcjar")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE));
        let mode = if matches.get_flag("noregex") {
            OutputMode::Raw
        } else {
            OutputMode::Pattern
        };

        Config {
            archive,
            entry: value("langpath").to_string(),
            mode,
            filter: MessageFilter::new(value("prefix"), value("ignorekeys")),
            escape: matches.get_flag("escape"),
            verbosity: matches.get_count("verbose"),
        }
    }
}

/// Command line definition
pub fn build_cli() -> Command {
    Command::new("deathmsg-regex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract death messages from a Minecraft jar and compile them into a regex")
        .arg(
            Arg::new("mcjar")
                .long("mcjar")
                .short('j')
                .help("Minecraft jar to extract messages from")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_ARCHIVE),
        )
        .arg(
            Arg::new("langpath")
                .long("langpath")
                .short('l')
                .help("Path to the language file inside the jar")
                .default_value(DEFAULT_ENTRY),
        )
        .arg(
            Arg::new("noregex")
                .long("noregex")
                .short('n')
                .help("Print the raw messages instead of a regex")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .help("Key prefix to filter for in the language file")
                .default_value(DEFAULT_PREFIX),
        )
        .arg(
            Arg::new("ignorekeys")
                .long("ignorekeys")
                .short('i')
                .help("Keys to ignore (comma separated)")
                .default_value(DEFAULT_IGNORE_KEYS),
        )
        .arg(
            Arg::new("escape")
                .long("escape")
                .short('e')
                .help("Escape regex metacharacters in message text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more detail to stderr (repeat for more)")
                .action(ArgAction::Count),
        )
}
