use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::memory::DesignRecord;

pub const MISSING_BRIEF: &str = "No design brief found in generated HTML";

static BRIEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--\s*DESIGN BRIEF:\s*(.*?)\s*-->").expect("design brief pattern")
});

static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Pull the `<!-- DESIGN BRIEF: ... -->` comment out of a generated page.
///
/// Model output is unreliable, so a missing or empty brief yields
/// [`MISSING_BRIEF`] instead of an error.
pub fn extract_design_summary(html: &str, date: &str) -> DesignRecord {
    let brief = BRIEF_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| WS_RE.replace_all(m.as_str(), " ").trim().to_string())
        .filter(|b| !b.is_empty());

    let brief = match brief {
        Some(b) => {
            debug!("Design brief extracted - date={}, length={} chars", date, b.chars().count());
            b
        }
        None => {
            warn!("No design brief in generated page - date={}, html_length={} chars", date, html.len());
            MISSING_BRIEF.to_string()
        }
    };

    DesignRecord::new(date, brief)
}
