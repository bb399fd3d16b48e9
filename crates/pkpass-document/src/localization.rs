//! # Localization Tables
//!
//! Translated strings per language, handed to the packaging stage as
//! `<lang>.lproj/pass.strings` payloads.
//!
//! Language tags and keys are both compared case-insensitively. The first
//! spelling seen is the one kept; a later write under a differently cased
//! key replaces the value only. Languages and keys render in insertion
//! order.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct Language {
    tag: String,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Language {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    fn set(&mut self, key: &str, value: String) {
        let folded = key.to_lowercase();
        match self.index.get(&folded) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(folded, self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(&key.to_lowercase())
            .map(|&i| self.entries[i].1.as_str())
    }
}

/// Per-language key/value string tables.
#[derive(Debug, Clone, Default)]
pub struct LocalizationTable {
    languages: Vec<Language>,
    index: HashMap<String, usize>,
}

impl LocalizationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` for `language`, creating the language if needed.
    pub fn add(&mut self, language: &str, key: &str, value: impl Into<String>) {
        let folded = language.to_lowercase();
        let slot = match self.index.get(&folded) {
            Some(&i) => i,
            None => {
                let i = self.languages.len();
                self.index.insert(folded, i);
                self.languages.push(Language::new(language));
                i
            }
        };
        self.languages[slot].set(key, value.into());
    }

    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.language(language).and_then(|l| l.get(key))
    }

    /// Language tags as first spelled, in insertion order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|l| l.tag.as_str())
    }

    /// Entries of one language in insertion order.
    pub fn entries(&self, language: &str) -> impl Iterator<Item = (&str, &str)> {
        self.language(language)
            .into_iter()
            .flat_map(|l| l.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Render the `pass.strings` body for `language`, or `None` if the
    /// language has no entries.
    pub fn render_strings(&self, language: &str) -> Option<String> {
        let lang = self.language(language)?;
        let mut out = String::new();
        for (key, value) in &lang.entries {
            out.push('"');
            push_escaped(&mut out, key);
            out.push_str("\" = \"");
            push_escaped(&mut out, value);
            out.push_str("\";\n");
        }
        Some(out)
    }

    fn language(&self, language: &str) -> Option<&Language> {
        self.index
            .get(&language.to_lowercase())
            .map(|&i| &self.languages[i])
    }
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
}
