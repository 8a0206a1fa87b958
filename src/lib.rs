//! Extract death messages from a Minecraft client jar and compile them into
//! a single regular expression.
//!
//! The pipeline reads one language file out of the jar, keeps the messages
//! whose key matches a prefix, sorts them and joins them into an alternation
//! with the format placeholders turned into regex fragments.
//!
//! ```no_run
//! use deathmsg_regex::{MessageFilter, extract_messages, read_entry, regexpify};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let content = read_entry(Path::new("minecraft.jar"), "assets/minecraft/lang/en_us.json")?;
//! let filter = MessageFilter::new("death.", "death.attack.badRespawnPoint.link");
//! let messages = extract_messages(&content, &filter)?;
//! println!("{}", regexpify(&messages));
//! # Ok(())
//! # }
//! ```

use std::io::Write;

pub mod archive;
pub mod config;
pub mod error;
pub mod loader;
pub mod pattern;


pub use archive::read_entry;
pub use config::{Config, OutputMode, build_cli};
pub use error::{ExtractError, ExtractResult};
pub use loader::{LanguageMap, MessageFilter, extract_messages};
pub use pattern::{compile_message, regexpify, regexpify_escaped};

/// Run the whole pipeline for `config`, writing results to `out`
///
/// Nothing is written unless extraction succeeds.
pub fn run<W: Write>(config: &Config, out: &mut W) -> ExtractResult<()> {
    let content = read_entry(&config.archive, &config.entry)?;
    let messages = extract_messages(&content, &config.filter)?;

    match config.mode {
        OutputMode::Raw => {
            for message in &messages {
                writeln!(out, "{}", message).map_err(ExtractError::Output)?;
            }
        }
        OutputMode::Pattern => {
            if messages.is_empty() {
                tracing::warn!(
                    prefix = config.filter.prefix(),
                    "no messages matched, the pattern will be empty"
                );
            }
            let pattern = if config.escape {
                regexpify_escaped(&messages)
            } else {
                regexpify(&messages)
            };
            writeln!(out, "{}", pattern).map_err(ExtractError::Output)?;
        }
    }

    out.flush().map_err(ExtractError::Output)
}
