//! Optional AI post-processing of decrypted note text.
//!
//! Strictly OUTSIDE the trust boundary: this module only ever receives
//! already-decrypted plaintext the user explicitly asked to send out, and
//! never ciphertext, keys, or locators. Every call is best-effort — a
//! failure here must not affect the view flow, so the public helpers fall
//! back instead of propagating.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde_json::json;

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub struct GeminiClient {
    api_key: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client from `GEMINI_API_KEY`, or `None` when unset.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .ok()?;
        Some(Self { api_key, client })
    }

    /// Reformat raw text into structured Markdown. Falls back to the
    /// original text on any failure.
    pub async fn auto_format(&self, raw: &str) -> String {
        let prompt = format!(
            "You are a document formatter.\n\
             Task: Reformat the following raw text into clean, structured Markdown.\n\
             - Use proper headers (#, ##).\n\
             - Use lists where appropriate.\n\
             - Fix basic typos if obvious.\n\
             - Do NOT add any conversational filler (\"Here is your text...\"). \
             Just return the markdown.\n\n\
             Raw Text:\n{raw}"
        );
        match self.generate(&prompt).await {
            Ok(formatted) => formatted,
            Err(e) => {
                tracing::warn!("auto-format unavailable, keeping original text: {e:#}");
                raw.to_string()
            }
        }
    }

    /// Two-sentence summary, or `None` when the service is unreachable.
    pub async fn summarize(&self, text: &str) -> Option<String> {
        let prompt = format!("Summarize the following note in 2 sentences: {text}");
        match self.generate(&prompt).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("summary unavailable: {e:#}");
                None
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .client
            .post(GEMINI_ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("Gemini returned HTTP {}", resp.status()));
        }

        let payload: serde_json::Value = resp.json().await.context("Gemini response not JSON")?;
        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("Gemini response missing text"))?;
        Ok(text.trim().to_string())
    }
}
