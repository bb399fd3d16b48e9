//! Write-progress hooks.
//!
//! The orchestrator reports each top-level section it emits to a
//! [`WriteObserver`]. Observers see progress only; they cannot alter output.

use std::fmt;

/// Top-level sections of the document, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Semantics,
    StandardKeys,
    UserInfo,
    Relevance,
    Appearance,
    Expiration,
    Barcodes,
    Nfc,
    StyleFields,
    PreferredStyleSchemes,
    LegacyBarcode,
    WebService,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Self::Semantics,
            Self::StandardKeys,
            Self::UserInfo,
            Self::Relevance,
            Self::Appearance,
            Self::Expiration,
            Self::Barcodes,
            Self::Nfc,
            Self::StyleFields,
            Self::PreferredStyleSchemes,
            Self::LegacyBarcode,
            Self::WebService,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantics => "semantics",
            Self::StandardKeys => "standard keys",
            Self::UserInfo => "user info",
            Self::Relevance => "relevance",
            Self::Appearance => "appearance",
            Self::Expiration => "expiration",
            Self::Barcodes => "barcodes",
            Self::Nfc => "nfc",
            Self::StyleFields => "style fields",
            Self::PreferredStyleSchemes => "preferred style schemes",
            Self::LegacyBarcode => "legacy barcode",
            Self::WebService => "web service",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives one callback per section, before the section is written.
/// Sections with nothing to emit are still reported.
pub trait WriteObserver {
    fn section(&mut self, section: Section);

    /// Called once after the closing brace has been written.
    fn finished(&mut self) {}
}

/// Logs progress at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl WriteObserver for TracingObserver {
    fn section(&mut self, section: Section) {
        tracing::debug!(section = section.as_str(), "writing pass section");
    }

    fn finished(&mut self) {
        tracing::debug!("pass document written");
    }
}

/// Discards all callbacks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WriteObserver for NoopObserver {
    fn section(&mut self, _section: Section) {}
}

/// Records the sections in the order they were reported.
impl WriteObserver for Vec<Section> {
    fn section(&mut self, section: Section) {
        self.push(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_observer_records_in_order() {
        let mut seen = Vec::new();
        seen.section(Section::Semantics);
        seen.section(Section::Nfc);
        seen.finished();
        assert_eq!(seen, vec![Section::Semantics, Section::Nfc]);
    }

    #[test]
    fn section_names_are_distinct() {
        let mut names: Vec<_> = Section::all().iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Section::all().len());
    }
}
