use super::AnswerGenerator;
use crate::error::{CalibrationError, Result};
use crate::types::AnswerOutcome;
use anyhow::anyhow;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::time::Duration;

/// Environment variables consulted, in order, when no key is passed explicitly.
pub const API_KEY_VARS: &[&str] = &["HEDGECAL_API_KEY", "GOOGLE_API_KEY", "OPENAI_API_KEY"];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub model: String,
    pub api_base: Option<String>,
    pub api_key: String,
    pub timeout: Duration,
    /// Requests per second; `None` means unthrottled.
    pub qps: Option<u32>,
    pub system_prompt: Option<String>,
}

impl GeneratorConfig {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: None,
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
            qps: None,
            system_prompt: None,
        }
    }
}

/// Explicit key first, then the first non-empty variable in [`API_KEY_VARS`].
pub fn resolve_api_key(explicit: Option<String>) -> Result<String> {
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            API_KEY_VARS
                .iter()
                .filter_map(|v| std::env::var(v).ok())
                .find(|k| !k.trim().is_empty())
        })
        .ok_or_else(|| {
            CalibrationError::Config(format!(
                "no API key: pass --api-key or set one of {}",
                API_KEY_VARS.join(", ")
            ))
        })
}

/// Answers questions through any OpenAI-compatible chat-completions endpoint.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: Option<String>,
    timeout: Duration,
    limiter: Option<DefaultDirectRateLimiter>,
}

impl OpenAiGenerator {
    pub fn new(cfg: GeneratorConfig) -> Result<Self> {
        if cfg.model.trim().is_empty() {
            return Err(CalibrationError::Config("a model name is required".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| CalibrationError::Config(format!("http client: {e}")))?;
        let mut oa = OpenAIConfig::default().with_api_key(cfg.api_key);
        if let Some(url) = cfg.api_base { oa = oa.with_api_base(url); }
        let client = Client::with_config(oa).with_http_client(http);
        let limiter = cfg.qps.map(|qps| {
            let qps = NonZeroU32::new(qps).unwrap_or(nonzero!(1u32));
            RateLimiter::direct(Quota::per_second(qps))
        });
        Ok(Self { client, model: cfg.model, system_prompt: cfg.system_prompt, timeout: cfg.timeout, limiter })
    }

    pub fn model(&self) -> &str { &self.model }

    fn build_prompt(&self, question: &str) -> anyhow::Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(sys) = &self.system_prompt {
            messages.push(ChatCompletionRequestSystemMessageArgs::default().content(sys.as_str()).build()?.into());
        }
        messages.push(ChatCompletionRequestUserMessageArgs::default().content(question).build()?.into());
        Ok(messages)
    }

    async fn chat(&self, question: &str) -> anyhow::Result<String> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
        let req = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(self.build_prompt(question)?)
            .build()?;
        // the client backs off on 429/5xx internally; bound the whole exchange
        let resp = tokio::time::timeout(self.timeout, self.client.chat().create(req))
            .await
            .map_err(|_| anyhow!("no response within {:?}", self.timeout))??;
        let choice = resp.choices.into_iter().next().ok_or_else(|| anyhow!("response carried no choices"))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl AnswerGenerator for OpenAiGenerator {
    async fn generate(&self, question: &str) -> AnswerOutcome {
        tracing::info!(model = %self.model, question, "querying model");
        match self.chat(question).await {
            Ok(text) => AnswerOutcome::Answer(text),
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "model query failed");
                AnswerOutcome::Failure
            }
        }
    }
}
