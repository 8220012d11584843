use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::ChatModel;
use crate::config::{PlannerConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{PlannerError, Result};

/// Client for an OpenAI-compatible chat completions endpoint.
///
/// Each call is a single round trip. Rate limits and server errors are
/// reported to the caller, never retried.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            http: reqwest::Client::new(),
        }
    }

    /// Build a client from configuration; fails when no credential is set.
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| PlannerError::Config("OpenAI API key not configured".to_string()))?;
        Ok(Self::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_timeout(config.timeout))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .http
            .post(&request_url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| PlannerError::Upstream(format!("HTTP request failed: {err}")))?;

        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response
            .text()
            .await
            .map_err(|err| PlannerError::Upstream(format!("Failed to read response: {err}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(PlannerError::RateLimit {
                retry_after: retry_after.max(1),
            });
        }

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(PlannerError::Upstream(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        if let Some(error) = response_json.get("error").filter(|error| !error.is_null()) {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(PlannerError::Upstream(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl ChatModel for OpenAIClient {
    async fn complete(&self, prompt: &str, temperature: f64) -> Result<String> {
        let body = ChatCompletionRequest::new(
            self.model.clone(),
            vec![json!({"role": "user", "content": prompt})],
        )
        .with_temperature(temperature)
        .into_value();

        let response = self.chat_completion(&body).await?;
        extract_message_content(&response)
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

fn extract_message_content(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or_else(|| {
            PlannerError::Upstream("Completion response did not contain message content".into())
        })
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}
