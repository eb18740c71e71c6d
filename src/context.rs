use itertools::Itertools;

use crate::memory::DesignRecord;

/// Shorten a brief for display only; the stored record keeps the full text.
pub fn truncate_brief(brief: &str, max_chars: usize) -> String {
    if brief.chars().count() <= max_chars {
        return brief.to_string();
    }
    let kept: String = brief.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn format_recent_designs(records: &[DesignRecord], max_chars: usize) -> String {
    if records.is_empty() {
        return "<recent_designs>\nNo previous designs on record. This is your first design!\n</recent_designs>"
            .to_string();
    }

    let mut out = String::from("<recent_designs>\n");
    out.push_str(
        "The following designs were used in recent days. DO NOT repeat these approaches; find something different.\n\n",
    );
    for r in records {
        out.push_str(&format!("**{}**: {}\n\n", r.date, truncate_brief(&r.brief, max_chars)));
    }
    out.push_str("</recent_designs>");
    out
}

/// Empty input means the section is left out of the prompt entirely.
pub fn format_tired_aesthetics(tired: &[&str], window_days: usize) -> String {
    if tired.is_empty() {
        return String::new();
    }

    format!(
        "<tired_aesthetics>\n\
         The following aesthetic directions have been used in the last {w} days and should be AVOIDED today:\n\
         {list}\n\n\
         These aren't permanently banned. They become available again once they fall out of the {w}-day window. \
         But for today, choose something different.\n\
         </tired_aesthetics>",
        w = window_days,
        list = tired.iter().join(", ")
    )
}
