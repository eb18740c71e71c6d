mod aesthetics;
mod api_types;
mod brief;
mod budget;
mod context;
mod fatigue;
mod fetch;
mod llm;
mod memory;
mod models;
mod orchestrator;
mod prompts;
mod render;
mod settings;

use anyhow::Result;
use awful_aj::{config, template};
use chrono::{Duration, Utc};
use chrono_tz::America::New_York;
use clap::builder::TypedValueParser;
use clap::Parser;
use reqwest::Client;
use tracing::{debug, info};

use fetch::{curate_articles, fetch_latest_edition, load_articles_file};
use llm::AwfulJadeGenerator;
use memory::JsonFileStore;
use orchestrator::{build_design_context, run_daily};
use settings::{MemorySettings, DEFAULT_BRIEF_MAX_CHARS, DEFAULT_RECENT_COUNT, DEFAULT_WINDOW_DAYS};

const ARTICLES_PER_PAGE: usize = 10;

/// news.sys - daily news page designed by an LLM, with design memory
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for generated pages (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Path to config file (overrides AJ_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<String>,

    /// Design memory file (JSON array of {date, brief})
    #[arg(long, env = "NEWS_SYS_MEMORY_FILE", default_value = "design_memory.json")]
    memory_file: String,

    /// Days of design history kept and scanned for tired aesthetics
    #[arg(long, env = "NEWS_SYS_WINDOW_DAYS", default_value_t = DEFAULT_WINDOW_DAYS,
          value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    window_days: usize,

    /// Recent designs shown to the model
    #[arg(long, env = "NEWS_SYS_RECENT_COUNT", default_value_t = DEFAULT_RECENT_COUNT,
          value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize))]
    recent_count: usize,

    /// Display cap for a single brief, in characters
    #[arg(long, env = "NEWS_SYS_BRIEF_MAX_CHARS", default_value_t = DEFAULT_BRIEF_MAX_CHARS,
          value_parser = clap::value_parser!(u64).range(4..).map(|v| v as usize))]
    brief_max_chars: usize,

    /// Curated articles as a JSON array; fetched from the edition API when absent
    #[arg(long)]
    articles: Option<String>,

    /// Print the design-memory sections of today's prompt and exit
    #[arg(long)]
    print_context: bool,
}

impl Args {
    fn memory_settings(&self) -> MemorySettings {
        MemorySettings {
            window_days: self.window_days,
            recent_count: self.recent_count,
            brief_max_chars: self.brief_max_chars,
        }
    }
}

fn resolve_paths() -> Result<(std::path::PathBuf, std::path::PathBuf, std::path::PathBuf)> {
    // 1) Base config dir: prefer env override, else awful_aj::config_dir()
    let base_dir = if let Ok(dir) = std::env::var("AJ_CONFIG_DIR") {
        std::path::PathBuf::from(dir)
    } else {
        awful_aj::config_dir()
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
    };

    // 2) Config file: prefer AJ_CONFIG, else <base>/config.yaml
    let cfg_path = if let Ok(p) = std::env::var("AJ_CONFIG") {
        std::path::PathBuf::from(p)
    } else {
        base_dir.join("config.yaml")
    };

    // 3) Template dir: prefer AJ_TEMPLATE_DIR, else <base>/templates
    let tpl_dir = if let Ok(p) = std::env::var("AJ_TEMPLATE_DIR") {
        std::path::PathBuf::from(p)
    } else {
        let d = base_dir.join("templates");
        // make it visible to awful_aj::template loader
        std::env::set_var("AJ_TEMPLATE_DIR", &d);
        d
    };

    Ok((base_dir, cfg_path, tpl_dir))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    let settings = args.memory_settings();
    let store = JsonFileStore::new(&args.memory_file, settings.window_days);

    info!(
        "Starting news_sys - memory_file={}, window_days={}, recent_count={}",
        store.path().display(), settings.window_days, settings.recent_count
    );

    if args.print_context {
        let ctx = build_design_context(&store, &settings);
        println!("{}", ctx.recent_section);
        if !ctx.tired_section.is_empty() {
            println!("\n{}", ctx.tired_section);
        }
        return Ok(());
    }

    // Determine config path: CLI arg > resolve_paths logic
    let cfg_path = if let Some(ref config_path) = args.config {
        debug!("Using config file from --config argument: {}", config_path);
        std::path::PathBuf::from(config_path)
    } else {
        let (_base_dir, cfg_path, _tpl_dir) = resolve_paths()?;
        debug!("Using config file from environment/default: {}", cfg_path.display());
        cfg_path
    };

    if !cfg_path.exists() {
        return Err(anyhow::anyhow!(
            "awful_aj config not found at {}\n\
             Use --config to specify a config file, or set AJ_CONFIG environment variable.\n\
             Example config.yaml:\n\
             api_key: \"YOUR_KEY\"\napi_base: \"http://localhost:5001/v1\"\nmodel: \"qwen3_30b_a3\"\n",
            cfg_path.display()
        ));
    }

    let cfg = config::load_config(
        cfg_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("invalid config path"))?,
    )
    .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let tpl_builder_name = std::env::var("AJ_TEMPLATE_BUILDER").unwrap_or_else(|_| "news_sys_builder".to_string());
    let tpl_builder = template::load_template(&tpl_builder_name).await.map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // Dates in Eastern time to match the edition API's publishing day
    let utc_now = Utc::now();
    let eastern_now = utc_now.with_timezone(&New_York);
    let today = eastern_now.date_naive();
    let yesterday = today - Duration::days(1);

    let ymd_today = today.format("%Y-%m-%d").to_string();
    let ymd_yesterday = yesterday.format("%Y-%m-%d").to_string();
    let today_human = today.format("%B %-d, %Y").to_string();
    let updated_utc = utc_now.format("Updated %H:%M UTC").to_string();

    info!("Date - today={}, output_dir={}", ymd_today, args.output_dir);
    debug!("Using Eastern timezone - current_time={}", eastern_now.format("%Y-%m-%d %H:%M:%S %Z"));

    let articles = match args.articles {
        Some(ref path) => load_articles_file(std::path::Path::new(path))?,
        None => {
            let client = Client::builder().build()?;
            let edition = fetch_latest_edition(&client, &ymd_today, &ymd_yesterday).await?;
            info!("Using edition - id={}, articles={}", edition.edition_id, edition.articles.len());
            edition.articles
        }
    };
    let articles = curate_articles(articles, ARTICLES_PER_PAGE);

    let generator = AwfulJadeGenerator {
        cfg: &cfg,
        tpl: &tpl_builder,
    };

    let outcome = run_daily(
        &generator,
        &store,
        &settings,
        articles,
        &ymd_today,
        &today_human,
        &updated_utc,
        std::path::Path::new(&args.output_dir),
    )
    .await?;

    info!(
        "Today's design - page={}, avoided={}, brief={}",
        outcome.page_path.display(),
        outcome.tired.len(),
        outcome.record.brief
    );
    Ok(())
}
