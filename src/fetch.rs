use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::api_types::*;
use crate::models::*;

pub const EDITION_SLOTS_LATEST_FIRST: [&str; 3] = ["evening", "afternoon", "morning"];

pub fn make_article_id(source: &str, title: &str) -> String {
    format!("{:016x}", xxh3_64(format!("{}|{}", source, title).as_bytes()))
}

/// Try to fetch one edition; return Ok(None) on 404 (missing edition)
pub async fn fetch_edition_opt(client: &Client, ymd: &str, slot: &str) -> Result<Option<Edition>> {
    let url = format!("https://news.awfulsec.com/api/{}/{}.json", ymd, slot);
    let start = std::time::Instant::now();

    debug!("Fetching edition - date={}, slot={}", ymd, slot);

    let resp = client.get(&url).send().await
        .with_context(|| format!("Request failed for {}", url))?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        debug!("Edition not found (404) - {}/{}", ymd, slot);
        return Ok(None);
    }

    let resp = resp.error_for_status()
        .with_context(|| format!("HTTP error for {}", url))?;

    let api_ed: ApiEdition = resp.json().await
        .with_context(|| format!("Decoding JSON for {}", url))?;

    // trust the requested date/slot over the payload's own metadata
    let edition_id = format!("{}-{}", ymd, slot);
    debug!("Edition metadata - id={}, api_date={}, api_slot={}", edition_id, api_ed.local_date, api_ed.time_of_day);

    let articles: Vec<Article> = api_ed.articles.into_iter().map(|a| Article {
        id: make_article_id(&a.source, &a.title),
        title: a.title,
        source: a.source,
        category: a.category,
        summary: a.summary_of_news_article,
        key_takeaways: a.key_take_aways,
    }).collect();

    info!(
        "Edition API fetch completed - edition={}/{}, duration={:.2}s, articles={}",
        ymd, slot, start.elapsed().as_secs_f32(), articles.len()
    );

    Ok(Some(Edition { edition_id, articles }))
}

/// Newest edition available, searching today's slots before yesterday's.
pub async fn fetch_latest_edition(client: &Client, ymd_today: &str, ymd_yesterday: &str) -> Result<Edition> {
    for ymd in [ymd_today, ymd_yesterday] {
        for slot in EDITION_SLOTS_LATEST_FIRST {
            if let Some(ed) = fetch_edition_opt(client, ymd, slot).await? {
                return Ok(ed);
            }
            warn!("Missing edition: {}/{}", ymd, slot);
        }
    }
    bail!(
        "No editions available (checked {}/{{evening,afternoon,morning}} and {}/{{evening,afternoon,morning}}).",
        ymd_today,
        ymd_yesterday
    )
}

/// Read a JSON array of articles prepared by an upstream curation step.
pub fn load_articles_file(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read articles file {}", path.display()))?;
    let mut articles: Vec<Article> = serde_json::from_str(&raw)
        .with_context(|| format!("parse articles file {}", path.display()))?;
    for a in articles.iter_mut() {
        if a.id.is_empty() {
            a.id = make_article_id(&a.source, &a.title);
        }
    }
    debug!("Articles loaded from file - path={}, articles={}", path.display(), articles.len());
    Ok(articles)
}

/// Trim titles, drop repeats (same id or same case-folded title), keep the first `limit`.
pub fn curate_articles(articles: Vec<Article>, limit: usize) -> Vec<Article> {
    let before = articles.len();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();

    let curated: Vec<Article> = articles
        .into_iter()
        .map(|mut a| {
            a.title = a.title.trim().to_string();
            a
        })
        .filter(|a| !a.title.is_empty())
        .filter(|a| seen_ids.insert(a.id.clone()) && seen_titles.insert(a.title.to_lowercase()))
        .take(limit)
        .collect();

    debug!("Articles curated - input={}, kept={}, limit={}", before, curated.len(), limit);
    curated
}
