// src/services/hybrid.rs
//
// The hybrid resolution flow: primary provider, then backup, then the fixed
// critical-failure reply. One pass per user message, both remote calls
// strictly sequential, no retries and no circuit breaker.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::local_responder;
use super::provider::Responder;
use super::resume::ResumeGraph;
use super::session_manager::{Message, MessageRole};
use crate::message::Reply;

/// Appended to replies that came through the backup path so the user can see
/// the primary provider was skipped.
pub const BACKUP_SUFFIX: &str = "\n\n*(Generated via Backup AI)*";

/// Shown when both providers fail. Always a normal reply, never an error.
pub const CRITICAL_FAILURE_TEXT: &str = "CRITICAL FAILURE: I could not connect to Google \
Gemini OR OpenAI. Please check your API keys and network connection.";

/// Which path produced a reply. Feeds metrics and analytics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplySource {
    Primary,
    Backup,
    Local,
    CriticalFailure,
}

impl ReplySource {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplySource::Primary => "primary",
            ReplySource::Backup => "backup",
            ReplySource::Local => "local",
            ReplySource::CriticalFailure => "critical_failure",
        }
    }
}

pub struct HybridResponder<P, B> {
    primary: P,
    backup: B,
    resume: Arc<ResumeGraph>,
}

impl<P: Responder, B: Responder> HybridResponder<P, B> {
    pub fn new(primary: P, backup: B, resume: Arc<ResumeGraph>) -> Self {
        Self {
            primary,
            backup,
            resume,
        }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn backup(&self) -> &B {
        &self.backup
    }

    /// Resolve one user submission into a reply. Infallible: every failure
    /// mode ends in a displayable reply.
    pub async fn resolve(&self, history: &[Message]) -> (Reply, ReplySource) {
        let latest = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");

        // Empty input never reaches the remote path. The UI should prevent
        // it, but the local responder is total so this is always safe.
        if latest.trim().is_empty() {
            return (
                local_responder::respond(&self.resume, latest),
                ReplySource::Local,
            );
        }

        match self.primary.respond(history).await {
            Ok(reply) => {
                info!(provider = self.primary.name(), "reply resolved by primary");
                (reply, ReplySource::Primary)
            }
            Err(primary_err) => {
                warn!(
                    provider = self.primary.name(),
                    error = %primary_err,
                    "primary provider failed, switching to backup",
                );
                match self.backup.respond(history).await {
                    Ok(mut reply) => {
                        info!(provider = self.backup.name(), "reply resolved by backup");
                        reply.text.push_str(BACKUP_SUFFIX);
                        (reply, ReplySource::Backup)
                    }
                    Err(backup_err) => {
                        error!(
                            primary = %primary_err,
                            backup = %backup_err,
                            "all providers failed",
                        );
                        (
                            Reply {
                                text: CRITICAL_FAILURE_TEXT.to_string(),
                                node_id: None,
                                action: None,
                            },
                            ReplySource::CriticalFailure,
                        )
                    }
                }
            }
        }
    }
}
