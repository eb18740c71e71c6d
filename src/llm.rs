use anyhow::{anyhow, Result};
use awful_aj::{api::ask, config::AwfulJadeConfig, template::ChatTemplate};
use tracing::{debug, info};

/// Turns a design prompt into an HTML page.
#[allow(async_fn_in_trait)]
pub trait PageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generator backed by an OpenAI-compatible endpoint through awful_aj.
pub struct AwfulJadeGenerator<'a> {
    pub cfg: &'a AwfulJadeConfig,
    pub tpl: &'a ChatTemplate,
}

impl PageGenerator for AwfulJadeGenerator<'_> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start = std::time::Instant::now();

        debug!("LLM call starting - prompt_length={} chars", prompt.len());

        // Map Box<dyn StdError> -> anyhow::Error *before* `?`
        let answer = ask(self.cfg, prompt.to_string(), self.tpl, None, None, false)
            .await
            .map_err(|e| anyhow!(e.to_string()))?;

        info!(
            "LLM API call completed - duration={:.2}s, response_length={} chars",
            start.elapsed().as_secs_f32(),
            answer.len()
        );

        Ok(answer)
    }
}
