// src/services/gemini.rs
//
// Primary remote responder: Google Generative Language API. The resume
// context, the transcript and the JSON-only instruction are flattened into a
// single content part.

use std::fmt::Write as _;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{ProviderError, Responder, parse_reply};
use super::session_manager::{Message, MessageRole};
use crate::config::Config;
use crate::message::Reply;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GeminiResponder {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    context: String,
}

impl GeminiResponder {
    pub fn new(config: &Config, context: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            context,
        }
    }

    fn build_prompt(&self, history: &[Message]) -> String {
        let mut prompt = self.context.clone();
        prompt.push_str("\n\nCONVERSATION SO FAR:\n");
        for msg in history {
            let who = match msg.role {
                MessageRole::User => "User",
                MessageRole::Bot => "You",
            };
            let _ = writeln!(prompt, "{who}: {}", msg.content);
        }
        prompt.push_str(
            "\nRemember to return ONLY a JSON object (no markdown formatting) like: \
             { \"text\": \"...\", \"nodeId\": \"...\", \"action\": null }",
        );
        prompt
    }
}

impl Responder for GeminiResponder {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn respond(&self, history: &[Message]) -> Result<Reply, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::Disabled);
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent?key={api_key}", self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: self.build_prompt(history),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::Network(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Auth(message),
                code => ProviderError::Api { status: code, message },
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|err| ProviderError::MalformedReply(format!("unexpected response shape: {err}")))?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedReply("no candidates in response".to_string()))?
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect();

        debug!(model = %self.model, chars = text.len(), "gemini answered");
        parse_reply(&text)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalyticsConfig, ProviderConfig};
    use std::time::Instant;

    fn config(api_key: Option<&str>) -> Config {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            gemini: ProviderConfig {
                api_key: api_key.map(str::to_string),
                model: "gemini-1.5-flash".to_string(),
            },
            openai: ProviderConfig {
                api_key: None,
                model: "gpt-3.5-turbo".to_string(),
            },
            admin_key: None,
            session_ttl: Duration::from_secs(60),
            analytics: AnalyticsConfig::default(),
        }
    }

    #[tokio::test]
    async fn disabled_without_key() {
        let responder = GeminiResponder::new(&config(None), "ctx".to_string());
        let err = responder.respond(&[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Disabled));
    }

    #[test]
    fn prompt_carries_context_and_transcript() {
        let responder = GeminiResponder::new(&config(Some("key")), "CONTEXT BLOCK".to_string());
        let history = vec![
            Message {
                role: MessageRole::User,
                content: "Tell me about RAG".to_string(),
                timestamp: Instant::now(),
            },
            Message {
                role: MessageRole::Bot,
                content: "Happy to.".to_string(),
                timestamp: Instant::now(),
            },
        ];
        let prompt = responder.build_prompt(&history);
        assert!(prompt.starts_with("CONTEXT BLOCK"));
        assert!(prompt.contains("User: Tell me about RAG"));
        assert!(prompt.contains("You: Happy to."));
        assert!(prompt.contains("ONLY a JSON object"));
    }
}
