// src/services/analytics.rs
//
// Optional GA4 measurement-protocol reporter. Fire-and-forget: events are
// dispatched on a detached task and a lost event only rates a debug log.
// Disabled entirely unless both the measurement id and API secret are set.

use serde_json::json;
use tracing::debug;

use crate::config::AnalyticsConfig;

const COLLECT_URL: &str = "https://www.google-analytics.com/mp/collect";

#[derive(Clone)]
pub struct AnalyticsReporter {
    client: reqwest::Client,
    config: AnalyticsConfig,
}

impl AnalyticsReporter {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.measurement_id.is_some() && self.config.api_secret.is_some()
    }

    pub fn record_chat_event(&self, session_id: &str, reply_source: &str) {
        self.send_event(
            session_id,
            json!({
                "name": "chat_message",
                "params": { "reply_source": reply_source }
            }),
        );
    }

    pub fn record_page_view(&self, session_id: &str, page: &str) {
        self.send_event(
            session_id,
            json!({
                "name": "page_view",
                "params": { "page_location": page }
            }),
        );
    }

    fn send_event(&self, session_id: &str, event: serde_json::Value) {
        let (Some(measurement_id), Some(api_secret)) =
            (&self.config.measurement_id, &self.config.api_secret)
        else {
            return;
        };

        let url = format!(
            "{COLLECT_URL}?measurement_id={measurement_id}&api_secret={api_secret}"
        );
        let body = json!({
            "client_id": session_id,
            "events": [event],
        });

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.post(&url).json(&body).send().await {
                debug!("analytics event dropped: {err}");
            }
        });
    }
}
