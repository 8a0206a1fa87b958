//! Compiling a message list into one alternation regular expression.
//!
//! Message strings use Java format placeholders. Each known placeholder is
//! replaced by a regex fragment:
//!
//! | placeholder | fragment |
//! |-------------|----------|
//! | `%1$s`      | `\S+`    |
//! | `%2$s`      | `\S+`    |
//! | `%3$s`      | `.*`     |
//! | `%s`        | `.*`     |
//!
//! Positional placeholders with other indexes are kept as they are.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(?:(\d+)\$)?s").expect("placeholder pattern is valid"));

/// Regex fragment for a placeholder, `None` when the placeholder is not known
fn fragment_for(caps: &Captures) -> Option<&'static str> {
    match caps.get(1).map(|m| m.as_str()) {
        None => Some(".*"),
        Some("1") | Some("2") => Some(r"\S+"),
        Some("3") => Some(".*"),
        Some(_) => None,
    }
}

/// Replace the placeholders of one message, optionally escaping the text around them
///
/// Placeholders are found in a single left to right pass, so a fragment is
/// never rescanned and `%1$s` is never mistaken for the generic `%s`.
pub fn compile_message(message: &str, escape: bool) -> String {
    let literal = |text: &str| {
        if escape {
            regex::escape(text)
        } else {
            text.to_string()
        }
    };

    let mut result = String::with_capacity(message.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(message) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        result.push_str(&literal(&message[last..whole.start()]));
        match fragment_for(&caps) {
            Some(fragment) => result.push_str(fragment),
            None => result.push_str(&literal(whole.as_str())),
        }
        last = whole.end();
    }
    result.push_str(&literal(&message[last..]));
    result
}

fn alternation<'a>(messages: impl IntoIterator<Item = &'a String>, escape: bool) -> String {
    let alternatives: Vec<String> = messages
        .into_iter()
        .map(|message| compile_message(message, escape))
        .collect();
    format!("({})", alternatives.join("|"))
}

/// Join `messages` into `(m1|m2|...)` with placeholders replaced
///
/// Message text is copied verbatim, so regex metacharacters it contains keep
/// their regex meaning. An empty list gives `()`.
pub fn regexpify(messages: &[String]) -> String {
    alternation(messages, false)
}

/// Like [`regexpify`], but message text outside placeholders is escaped
pub fn regexpify_escaped(messages: &[String]) -> String {
    alternation(messages, true)
}
