use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::error::{ExtractError, ExtractResult};

/// Messages of one language file, keyed by message key
///
/// The JSON file must be a flat object of strings:
/// ```json
/// {
///     "death.fell.accident.generic": "%1$s fell from a high place",
///     "death.attack.lava": "%1$s tried to swim in lava"
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct LanguageMap(pub HashMap<String, String>);

impl LanguageMap {
    /// Parse a language file from raw bytes
    ///
    /// # Errors
    /// [`ExtractError::Parse`] for invalid UTF-8, invalid JSON, a root that is
    /// not an object, or any value that is not a string.
    pub fn from_slice(content: &[u8]) -> ExtractResult<Self> {
        serde_json::from_slice(content).map_err(ExtractError::Parse)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values whose key passes `filter`, sorted ascending
    pub fn extract(&self, filter: &MessageFilter) -> Vec<String> {
        let mut messages: Vec<String> = self
            .0
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(_, value)| value.clone())
            .collect();
        // HashMap iteration order is random; sorting makes output reproducible
        messages.sort_unstable();
        messages
    }
}

/// Key selection rule: a required prefix plus a set of exact keys to skip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFilter {
    prefix: String,
    ignore: HashSet<String>,
}

impl MessageFilter {
    /// Build a filter from a prefix and a comma separated list of ignored keys
    ///
    /// Empty list segments are dropped, so `""` ignores nothing.
    pub fn new(prefix: &str, ignore_list: &str) -> Self {
        let ignore = ignore_list
            .split(',')
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
            .collect();
        MessageFilter {
            prefix: prefix.to_owned(),
            ignore,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn ignored(&self) -> &HashSet<String> {
        &self.ignore
    }

    pub fn matches(&self, key: &str) -> bool {
        key.starts_with(&self.prefix) && !self.ignore.contains(key)
    }
}

/// Parse `content` as a language file and extract the messages `filter` selects
pub fn extract_messages(content: &[u8], filter: &MessageFilter) -> ExtractResult<Vec<String>> {
    let map = LanguageMap::from_slice(content)?;
    let messages = map.extract(filter);
    tracing::info!(
        keys = map.len(),
        matched = messages.len(),
        prefix = filter.prefix(),
        "extracted messages"
    );
    Ok(messages)
}
