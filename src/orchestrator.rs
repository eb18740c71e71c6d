use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::aesthetics::category;
use crate::brief::{extract_design_summary, MISSING_BRIEF};
use crate::budget::{assert_prompt_budget, cap_summary, PROMPT_TOKEN_CAP, SUMMARY_TOKEN_CAP};
use crate::context::{format_recent_designs, format_tired_aesthetics};
use crate::fatigue::detect_tired;
use crate::llm::PageGenerator;
use crate::memory::{DesignRecord, DesignStore};
use crate::models::Article;
use crate::prompts::builder_prompt;
use crate::render::{clean_generated_html, render_articles_block};
use crate::settings::MemorySettings;

/// Design-memory sections for the next prompt.
#[derive(Debug, Clone)]
pub struct DesignContext {
    pub tired: Vec<&'static str>,
    pub recent_section: String,
    pub tired_section: String, // "" when nothing is tired
}

#[derive(Debug, Clone)]
pub struct DailyOutcome {
    pub record: DesignRecord,
    pub tired: Vec<&'static str>,
    pub page_path: PathBuf,
}

pub fn build_design_context<S: DesignStore>(store: &S, settings: &MemorySettings) -> DesignContext {
    let history = store.recent(settings.window_days);
    let tired = detect_tired(&history);
    for name in &tired {
        if let Some(c) = category(name) {
            debug!("Tired aesthetic - name={}, triggers={}", c.name, c.keywords.join("|"));
        }
    }

    let skip = history.len().saturating_sub(settings.recent_count);
    let recent_section = format_recent_designs(&history[skip..], settings.brief_max_chars);
    let tired_section = format_tired_aesthetics(&tired, settings.window_days);

    info!(
        "Design context built - history={}, shown={}, tired={}",
        history.len(),
        history.len() - skip,
        if tired.is_empty() { "none".to_string() } else { tired.join(", ") }
    );

    DesignContext {
        tired,
        recent_section,
        tired_section,
    }
}

/// Write the page under `<output>/<date>/index.html` and refresh `<output>/index.html`.
pub fn write_page(output_dir: &Path, ymd_today: &str, html: &str) -> Result<PathBuf> {
    let date_dir = output_dir.join(ymd_today);
    std::fs::create_dir_all(&date_dir)
        .with_context(|| format!("create output dir {}", date_dir.display()))?;

    let page_path = date_dir.join("index.html");
    std::fs::write(&page_path, html.as_bytes())
        .with_context(|| format!("write {}", page_path.display()))?;
    debug!("Wrote {}", page_path.display());

    let latest = output_dir.join("index.html");
    std::fs::write(&latest, html.as_bytes())
        .with_context(|| format!("write {}", latest.display()))?;
    debug!("Wrote {}", latest.display());

    Ok(page_path)
}

pub async fn run_daily<G: PageGenerator, S: DesignStore>(
    generator: &G,
    store: &S,
    settings: &MemorySettings,
    mut articles: Vec<Article>,
    ymd_today: &str,
    today_human: &str,
    updated_utc: &str,
    output_dir: &Path,
) -> Result<DailyOutcome> {
    let pipeline_start = std::time::Instant::now();
    info!("Pipeline started - date={}, articles={}", ymd_today, articles.len());

    if articles.is_empty() {
        bail!("No articles to design a page for ({}).", ymd_today);
    }

    // 1) design memory -> constraints
    let ctx = build_design_context(store, settings);

    // 2) prompt
    for a in articles.iter_mut() {
        cap_summary(a, SUMMARY_TOKEN_CAP);
    }
    let articles_block = render_articles_block(&articles);
    let prompt = builder_prompt(
        today_human,
        updated_utc,
        &articles_block,
        &ctx.recent_section,
        &ctx.tired_section,
    );
    assert_prompt_budget(&prompt, PROMPT_TOKEN_CAP)?;
    debug!("Prompt assembled - length={} chars", prompt.len());

    // 3) generation
    let gen_start = std::time::Instant::now();
    let raw = generator.generate(&prompt).await?;
    let html = clean_generated_html(&raw)?;
    info!(
        "Page generated - duration={:.2}s, html_length={} chars",
        gen_start.elapsed().as_secs_f32(),
        html.len()
    );

    // 4) summary, page, write-back
    // the brief comment may sit outside what the cleaner keeps
    let record = extract_design_summary(&raw, ymd_today);
    if record.brief == MISSING_BRIEF {
        warn!("Recording placeholder brief - date={}", ymd_today);
    }

    let page_path = write_page(output_dir, ymd_today, &html)?;
    store.append(record.clone())?;

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, page={}",
        pipeline_start.elapsed().as_secs_f32(),
        page_path.display()
    );

    Ok(DailyOutcome {
        record,
        tired: ctx.tired,
        page_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use std::cell::RefCell;

    struct FakeGenerator {
        reply: String,
        seen_prompt: RefCell<Option<String>>,
    }

    impl FakeGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                seen_prompt: RefCell::new(None),
            }
        }
    }

    impl PageGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            *self.seen_prompt.borrow_mut() = Some(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn articles() -> Vec<Article> {
        vec![Article {
            id: "a1".into(),
            title: "Rover finds ice".into(),
            source: "https://space.example.com/ice".into(),
            category: "science".into(),
            summary: "Ice found near the pole.".into(),
            key_takeaways: vec!["Water for future crews".into()],
        }]
    }

    const PAGE: &str = "```html\n<!DOCTYPE html>\n<!-- DESIGN BRIEF:\n  Discovery day. Blueprint\n  aesthetic with cyan grids. -->\n<html><body>ok</body></html>\n```";

    #[tokio::test]
    async fn test_run_daily_records_brief_and_writes_page() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(
            vec![DesignRecord::new("2025-01-14", "Green on black terminal with scanlines.")],
            10,
        );
        let generator = FakeGenerator::new(PAGE);
        let settings = MemorySettings::default();

        let outcome = run_daily(
            &generator,
            &store,
            &settings,
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.brief, "Discovery day. Blueprint aesthetic with cyan grids.");
        assert_eq!(outcome.tired, vec!["terminal/CRT/hacker"]);

        let history = store.load();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last(), Some(&outcome.record));

        let page = std::fs::read_to_string(&outcome.page_path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(tmp.path().join("index.html").exists());

        let prompt = generator.seen_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("Rover finds ice"));
        assert!(prompt.contains("**2025-01-14**: Green on black terminal"));
        assert!(prompt.contains("<tired_aesthetics>"));
        assert!(prompt.contains("terminal/CRT/hacker"));
    }

    struct FailingStore;

    impl DesignStore for FailingStore {
        fn load(&self) -> Vec<DesignRecord> {
            Vec::new()
        }

        fn append(&self, _record: DesignRecord) -> Result<()> {
            bail!("disk full")
        }
    }

    #[tokio::test]
    async fn test_brief_kept_when_other_comment_precedes_doctype() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(Vec::new(), 10);
        let generator = FakeGenerator::new(
            "<!-- DESIGN BRIEF: Blueprint cyan grids. -->\n<!-- generated page -->\n<!DOCTYPE html>\n<html><body>ok</body></html>",
        );

        let outcome = run_daily(
            &generator,
            &store,
            &MemorySettings::default(),
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.brief, "Blueprint cyan grids.");
        assert_eq!(store.load(), vec![outcome.record]);
    }

    #[tokio::test]
    async fn test_store_write_failure_fails_the_run() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = FakeGenerator::new(PAGE);

        let res = run_daily(
            &generator,
            &FailingStore,
            &MemorySettings::default(),
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await;

        let err = res.unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn test_first_run_has_no_tired_section() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(Vec::new(), 10);
        let generator = FakeGenerator::new(PAGE);

        run_daily(
            &generator,
            &store,
            &MemorySettings::default(),
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await
        .unwrap();

        let prompt = generator.seen_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("No previous designs on record"));
        assert!(!prompt.contains("<tired_aesthetics>"));
    }

    #[tokio::test]
    async fn test_missing_brief_still_recorded() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(Vec::new(), 10);
        let generator = FakeGenerator::new("<!DOCTYPE html><html><body>plain</body></html>");

        let outcome = run_daily(
            &generator,
            &store,
            &MemorySettings::default(),
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.brief, MISSING_BRIEF);
        assert_eq!(store.load(), vec![outcome.record]);
    }

    #[tokio::test]
    async fn test_non_html_reply_records_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(Vec::new(), 10);
        let generator = FakeGenerator::new("I cannot do that.");

        let res = run_daily(
            &generator,
            &store,
            &MemorySettings::default(),
            articles(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await;

        assert!(res.is_err());
        assert!(store.load().is_empty());
        assert!(!tmp.path().join("2025-01-15").exists());
    }

    #[tokio::test]
    async fn test_no_articles_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = InMemoryStore::with_records(Vec::new(), 10);
        let generator = FakeGenerator::new(PAGE);

        let res = run_daily(
            &generator,
            &store,
            &MemorySettings::default(),
            Vec::new(),
            "2025-01-15",
            "January 15, 2025",
            "Updated 06:00 UTC",
            tmp.path(),
        )
        .await;

        assert!(res.is_err());
        assert!(generator.seen_prompt.borrow().is_none());
    }

    #[test]
    fn test_context_shows_recent_but_scans_whole_window() {
        let mut records: Vec<DesignRecord> = (1..=5)
            .map(|i| DesignRecord::new(format!("2025-01-0{}", i), format!("Pastel study {}", i)))
            .collect();
        records[0].brief = "A redacted file, top secret stamps".into();
        let store = InMemoryStore::with_records(records, 10);

        let ctx = build_design_context(&store, &MemorySettings::default());
        assert_eq!(ctx.tired, vec!["government/classified"]);
        assert!(!ctx.recent_section.contains("2025-01-01"));
        assert!(!ctx.recent_section.contains("2025-01-02"));
        assert!(ctx.recent_section.contains("2025-01-03"));
        assert!(ctx.recent_section.contains("2025-01-05"));
    }
}
