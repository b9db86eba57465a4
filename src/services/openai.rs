// src/services/openai.rs
//
// Backup remote responder: OpenAI chat completions with JSON response format.
// Same contract as the primary; it does not know it is a backup.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{ProviderError, Responder, parse_reply};
use super::session_manager::{Message, MessageRole};
use crate::config::Config;
use crate::message::Reply;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const SUGGESTED_QUESTION_INSTRUCTION: &str = "\n\nCRITICAL INSTRUCTION: Answer the question \
concisely.\n\nYou MUST append a '💡 Suggested Question' section at the end of every answer. \
Suggest a logical next question based on the resume history.\n\nReturn ONLY a JSON object \
like: { \"text\": \"Answer... \\n\\n**💡 Suggested Question:** ...\", \"nodeId\": \"...\", \
\"action\": null }";

pub struct OpenAiResponder {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    context: String,
}

impl OpenAiResponder {
    pub fn new(config: &Config, context: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: config.openai.api_key.clone(),
            model: config.openai.model.clone(),
            context,
        }
    }

    fn build_messages(&self, history: &[Message]) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: format!("{}{SUGGESTED_QUESTION_INSTRUCTION}", self.context),
        }];
        for msg in history {
            messages.push(ChatMessage {
                role: match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Bot => "assistant",
                },
                content: msg.content.clone(),
            });
        }
        messages
    }
}

impl Responder for OpenAiResponder {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn respond(&self, history: &[Message]) -> Result<Reply, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::Disabled);
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(history),
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {api_key}"))
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
            let message = serde_json::from_str::<OpenAiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::Auth(message),
                code => ProviderError::Api { status: code, message },
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|err| ProviderError::MalformedReply(format!("unexpected response shape: {err}")))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedReply("no choices in response".to_string()))?
            .message
            .content;

        debug!(model = %self.model, chars = content.len(), "openai answered");
        parse_reply(&content)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
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
                api_key: None,
                model: "gemini-1.5-flash".to_string(),
            },
            openai: ProviderConfig {
                api_key: api_key.map(str::to_string),
                model: "gpt-3.5-turbo".to_string(),
            },
            admin_key: None,
            session_ttl: Duration::from_secs(60),
            analytics: AnalyticsConfig::default(),
        }
    }

    #[tokio::test]
    async fn disabled_without_key() {
        let responder = OpenAiResponder::new(&config(None), "ctx".to_string());
        let err = responder.respond(&[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Disabled));
    }

    #[test]
    fn transcript_maps_to_chat_roles() {
        let responder = OpenAiResponder::new(&config(Some("key")), "CONTEXT".to_string());
        let history = vec![
            Message {
                role: MessageRole::User,
                content: "hi".to_string(),
                timestamp: Instant::now(),
            },
            Message {
                role: MessageRole::Bot,
                content: "hello".to_string(),
                timestamp: Instant::now(),
            },
        ];
        let messages = responder.build_messages(&history);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.starts_with("CONTEXT"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
    }
}
