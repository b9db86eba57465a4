// src/services/metrics_manager.rs
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    /// Replies per resolution path: primary, backup, local, critical_failure.
    pub source_usage: HashMap<String, u64>,
    /// How often each graph node was highlighted in a reply.
    pub node_highlights: HashMap<String, u64>,
    /// Side-effect actions handed to the frontend.
    pub action_usage: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_source(&self, source: &str) {
        let mut data = self.inner.write().await;
        *data.source_usage.entry(source.to_string()).or_insert(0) += 1;
    }

    pub async fn record_node(&self, node_id: &str) {
        let mut data = self.inner.write().await;
        *data.node_highlights.entry(node_id.to_string()).or_insert(0) += 1;
    }

    pub async fn record_action(&self, action: &str) {
        let mut data = self.inner.write().await;
        *data.action_usage.entry(action.to_string()).or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counters_accumulate() {
        let metrics = MetricsManager::new();
        metrics.record_source("primary").await;
        metrics.record_source("primary").await;
        metrics.record_node("sbi").await;
        metrics.record_action("open_linkedin").await;

        let data = metrics.get_metrics().await;
        assert_eq!(data.source_usage.get("primary"), Some(&2));
        assert_eq!(data.node_highlights.get("sbi"), Some(&1));
        assert_eq!(data.action_usage.get("open_linkedin"), Some(&1));
    }
}
