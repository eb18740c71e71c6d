use unicode_normalization::UnicodeNormalization;

use crate::aesthetics::{AestheticCategory, AESTHETIC_CATALOG};
use crate::memory::DesignRecord;

/// Aesthetics already used inside the window, in catalog order.
pub fn detect_tired(records: &[DesignRecord]) -> Vec<&'static str> {
    detect_tired_in(records, AESTHETIC_CATALOG)
}

/// Plain substring search over every brief joined together, no stemming.
/// A category is tired on its first matching phrase.
pub fn detect_tired_in<'a>(records: &[DesignRecord], catalog: &'a [AestheticCategory]) -> Vec<&'a str> {
    if records.is_empty() {
        return Vec::new();
    }

    let corpus = records
        .iter()
        .map(|r| r.brief.nfc().collect::<String>().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    catalog
        .iter()
        .filter(|c| c.keywords.iter().any(|k| corpus.contains(&k.to_lowercase())))
        .map(|c| c.name)
        .collect()
}
