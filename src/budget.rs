use crate::models::Article;
use anyhow::{Result, bail};

pub const SUMMARY_TOKEN_CAP: usize = 160;
pub const PROMPT_TOKEN_CAP: usize = 24_000;

pub fn approx_tokens(s: &str) -> usize {
    // heuristic ~4 chars/token
    (s.chars().count() + 3) / 4
}

pub fn cap_summary(article: &mut Article, max_tokens: usize) {
    if approx_tokens(&article.summary) > max_tokens {
        let mut s = article.summary.clone();
        while approx_tokens(&s) > max_tokens {
            s.pop();
        }
        article.summary = s;
    }
}

pub fn assert_prompt_budget(prompt: &str, hard_cap: usize) -> Result<()> {
    let total = approx_tokens(prompt);
    if total > hard_cap {
        bail!(
            "Prompt budget exceeded: {} > {} tokens (fewer articles or shorter summaries needed)",
            total,
            hard_cap
        );
    }
    Ok(())
}
