//! services/client/src/adapters/hint.rs
//!
//! Adapter for the AI Hint service group (`/api/ai-hint`).

use crate::adapters::transport::{with_query, ServiceClient, ServiceGroup};
use ai_feedback_core::{
    domain::{Hint, HintRequest},
    ports::{HintService, PortResult},
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct HttpHintAdapter {
    client: ServiceClient,
}

impl HttpHintAdapter {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url, ServiceGroup::Hint),
        }
    }
}

#[async_trait]
impl HintService for HttpHintAdapter {
    async fn generate_hint(&self, request: &HintRequest) -> PortResult<Hint> {
        self.client.post("/generate", request).await
    }

    async fn fetch_hint_history(&self, student_id: i64, question_id: i64) -> PortResult<Vec<Hint>> {
        let student_id = student_id.to_string();
        let question_id = question_id.to_string();
        let path = with_query(
            "/history",
            &[("studentId", student_id.as_str()), ("questionId", question_id.as_str())],
        );
        self.client.get(&path).await
    }
}
