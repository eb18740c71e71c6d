// src/render.rs
use anyhow::{bail, Result};
use url::Url;

use crate::models::Article;

pub fn render_articles_block(articles: &[Article]) -> String {
    let mut out = String::new();
    for (i, a) in articles.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n", i + 1, a.title.trim()));
        out.push_str(&format!("Source: {} ({})\n", outlet_from_source(&a.source), a.source));
        if !a.category.is_empty() {
            out.push_str(&format!("Category: {}\n", a.category));
        }
        if !a.summary.trim().is_empty() {
            out.push_str(&format!("Summary: {}\n", a.summary.trim()));
        }
        if !a.key_takeaways.is_empty() {
            out.push_str("Key takeaways:\n");
            for k in a.key_takeaways.iter().take(4) {
                out.push_str(&format!("- {}\n", k));
            }
        }
        out.push('\n');
    }
    out
}

pub fn outlet_from_source(src: &str) -> String {
    if let Ok(u) = Url::parse(src) {
        if let Some(h) = u.host_str() {
            return h.trim_start_matches("www.").to_string();
        }
    }
    // Fallback for non-URL or unexpected strings
    let s = src.trim().trim_start_matches("www.");
    s.split('/').next().unwrap_or(s).to_lowercase()
}

/// Strip Markdown fences and chatter around the document the model returned.
pub fn clean_generated_html(raw: &str) -> Result<String> {
    let lower = raw.to_ascii_lowercase();
    let start = match (lower.find("<!doctype"), lower.find("<html")) {
        (Some(d), Some(h)) => d.min(h),
        (Some(d), None) => d,
        (None, Some(h)) => h,
        (None, None) => bail!("Generated output is not an HTML document ({} chars)", raw.len()),
    };

    // a design brief may sit just above <!DOCTYPE; keep it
    let start = match lower[..start].rfind("<!--") {
        Some(c) if lower[c..start].contains("design brief") => c,
        _ => start,
    };

    let end = lower
        .rfind("</html>")
        .map(|e| e + "</html>".len())
        .filter(|&e| e > start)
        .unwrap_or(raw.len());

    Ok(raw[start..end].trim().to_string())
}
