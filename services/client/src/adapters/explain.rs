//! services/client/src/adapters/explain.rs
//!
//! Adapter for the AI Explain service group (`/api/ai-explain`).

use crate::adapters::transport::{with_query, ServiceClient, ServiceGroup};
use ai_feedback_core::{
    domain::{ExplainRequest, Explanation},
    ports::{ExplainService, PortResult},
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct HttpExplainAdapter {
    client: ServiceClient,
}

impl HttpExplainAdapter {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url, ServiceGroup::Explain),
        }
    }
}

#[async_trait]
impl ExplainService for HttpExplainAdapter {
    async fn generate_explanation(&self, request: &ExplainRequest) -> PortResult<Explanation> {
        self.client.post("/generate", request).await
    }

    async fn fetch_explanation_history(
        &self,
        student_id: i64,
        material_id: i64,
    ) -> PortResult<Vec<Explanation>> {
        let student_id = student_id.to_string();
        let material_id = material_id.to_string();
        let path = with_query(
            "/history",
            &[("studentId", student_id.as_str()), ("materialId", material_id.as_str())],
        );
        self.client.get(&path).await
    }
}
