// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

/// Flat wire form of one chat exchange: the reply fields plus the session id
/// and the resolved action target, so the frontend only dispatches.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_target: Option<String>,
}

impl ChatResponse {
    pub fn new(session_id: String, reply: Reply) -> Self {
        let action_target = reply.action.map(|a| a.target().to_string());
        Self {
            session_id,
            text: reply.text,
            node_id: reply.node_id,
            action: reply.action,
            action_target,
        }
    }
}

/// What every responder produces: the answer text, an optional graph node to
/// highlight, and an optional browser side effect. The remote providers are
/// prompted to return exactly this shape as JSON (camelCase keys).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub text: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_action")]
    pub action: Option<Action>,
}

/// Where the generated resume PDF is served from. `report_generator` writes
/// the file under `public/` at this same relative path.
pub const RESUME_PDF_ROUTE: &str = "/resume/kumar-gyanam.pdf";

/// Browser-level side effects a reply may request. The frontend fires these
/// after displaying the text; the backend only hands over the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    OpenLinkedin,
    OpenGithub,
    OpenPortfolio,
    CallPhone,
    EmailMe,
    DownloadResume,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::OpenLinkedin => "open_linkedin",
            Action::OpenGithub => "open_github",
            Action::OpenPortfolio => "open_portfolio",
            Action::CallPhone => "call_phone",
            Action::EmailMe => "email_me",
            Action::DownloadResume => "download_resume",
        }
    }

    /// URL or URI the frontend should open for this action.
    pub fn target(self) -> &'static str {
        match self {
            Action::OpenLinkedin => "https://www.linkedin.com/in/kumar-gyanam/",
            Action::OpenGithub => "https://github.com/gyanamc",
            Action::OpenPortfolio => "https://gyanam.store",
            Action::CallPhone => "tel:+919953682525",
            Action::EmailMe => "mailto:gyanamc@gmail.com",
            Action::DownloadResume => RESUME_PDF_ROUTE,
        }
    }
}

// An LLM occasionally invents an action id. Dropping it beats rejecting an
// otherwise valid reply body.
fn lenient_action<'de, D>(deserializer: D) -> Result<Option<Action>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| serde_json::from_value(serde_json::Value::String(s)).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_as_snake_case() {
        let json = serde_json::to_string(&Action::OpenLinkedin).unwrap();
        assert_eq!(json, r#""open_linkedin""#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::OpenLinkedin);
    }

    #[test]
    fn unknown_action_is_dropped_not_rejected() {
        let reply: Reply =
            serde_json::from_str(r#"{"text": "hi", "nodeId": null, "action": "launch_rocket"}"#)
                .unwrap();
        assert_eq!(reply.action, None);
        assert_eq!(reply.text, "hi");
    }

    #[test]
    fn reply_accepts_missing_optional_fields() {
        let reply: Reply = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(reply.node_id, None);
        assert_eq!(reply.action, None);
    }

    #[test]
    fn chat_response_serializes_flat() {
        let resp = ChatResponse::new(
            "sid".to_string(),
            Reply {
                text: "hi".to_string(),
                node_id: Some("skills".to_string()),
                action: Some(Action::DownloadResume),
            },
        );
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["text"], "hi");
        assert_eq!(value["node_id"], "skills");
        assert_eq!(value["action"], "download_resume");
        assert_eq!(value["action_target"], RESUME_PDF_ROUTE);
        assert!(value.get("reply").is_none());
    }

    #[test]
    fn every_action_has_a_target() {
        for action in [
            Action::OpenLinkedin,
            Action::OpenGithub,
            Action::OpenPortfolio,
            Action::CallPhone,
            Action::EmailMe,
            Action::DownloadResume,
        ] {
            assert!(!action.target().is_empty());
        }
    }
}
