// src/services/mod.rs
pub mod analytics;
pub mod gemini;
pub mod hybrid;
pub mod local_responder;
pub mod metrics_manager;
pub mod openai;
pub mod provider;
pub mod report_generator;
pub mod resume;
pub mod session_manager;
