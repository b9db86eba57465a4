// src/state.rs
use std::sync::Arc;

use anyhow::Context as _;

use crate::config::Config;
use crate::services::analytics::AnalyticsReporter;
use crate::services::gemini::GeminiResponder;
use crate::services::hybrid::HybridResponder;
use crate::services::metrics_manager::MetricsManager;
use crate::services::openai::OpenAiResponder;
use crate::services::resume::ResumeGraph;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub metrics: MetricsManager,
    pub analytics: AnalyticsReporter,
    pub resume: Arc<ResumeGraph>,
    pub ai: HybridResponder<GeminiResponder, OpenAiResponder>,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let resume = Arc::new(
            ResumeGraph::load().context("embedded resume graph dataset is invalid")?,
        );
        let context = resume.system_context();
        let ai = HybridResponder::new(
            GeminiResponder::new(&config, context.clone()),
            OpenAiResponder::new(&config, context),
            Arc::clone(&resume),
        );

        Ok(Self {
            sessions: SessionManager::new(config.session_ttl),
            metrics: MetricsManager::new(),
            analytics: AnalyticsReporter::new(config.analytics),
            resume,
            ai,
            admin_key: config.admin_key,
        })
    }
}
