//! services/client/src/adapters/learning_bot.rs
//!
//! This module contains the adapter for the AI Learning Bot service group.
//! It implements the `LearningBotService` port from the `core` crate.

use crate::adapters::transport::{with_query, ServiceClient, ServiceGroup};
use ai_feedback_core::{
    domain::{ChatRequest, ChatResponse, StudentProfile, DEFAULT_MATERIALS_TOPIC},
    ports::{LearningBotService, PortResult},
};
use async_trait::async_trait;
use reqwest::Client;

/// An adapter that implements `LearningBotService` over `/api/ai-learning-bot`.
#[derive(Clone)]
pub struct HttpLearningBotAdapter {
    client: ServiceClient,
}

impl HttpLearningBotAdapter {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url, ServiceGroup::LearningBot),
        }
    }
}

/// Path of the materials endpoint, with the default topic filled in.
fn materials_path(student_id: i64, topic: Option<&str>) -> String {
    let topic = topic.unwrap_or(DEFAULT_MATERIALS_TOPIC);
    with_query(&format!("/materials/{}", student_id), &[("topic", topic)])
}

#[async_trait]
impl LearningBotService for HttpLearningBotAdapter {
    async fn send_chat_message(&self, request: &ChatRequest) -> PortResult<ChatResponse> {
        self.client.post("/chat", request).await
    }

    async fn fetch_profile(&self, student_id: i64) -> PortResult<StudentProfile> {
        self.client.get(&format!("/profile/{}", student_id)).await
    }

    async fn fetch_materials(&self, student_id: i64, topic: Option<&str>) -> PortResult<String> {
        self.client.get(&materials_path(student_id, topic)).await
    }
}
