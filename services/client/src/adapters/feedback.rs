//! services/client/src/adapters/feedback.rs
//!
//! This module contains the adapter for the AI Feedback service group.
//! It implements the `FeedbackService` port from the `core` crate.

use crate::adapters::transport::{ServiceClient, ServiceGroup};
use ai_feedback_core::{
    domain::{Feedback, FeedbackRequest, Recommendation},
    ports::{FeedbackService, PortResult},
};
use async_trait::async_trait;
use reqwest::Client;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `FeedbackService` over `/api/ai-feedback`.
#[derive(Clone)]
pub struct HttpFeedbackAdapter {
    client: ServiceClient,
}

impl HttpFeedbackAdapter {
    /// Creates a new `HttpFeedbackAdapter` on the host at `base_url`.
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            client: ServiceClient::new(http, base_url, ServiceGroup::Feedback),
        }
    }
}

//=========================================================================================
// `FeedbackService` Trait Implementation
//=========================================================================================

#[async_trait]
impl FeedbackService for HttpFeedbackAdapter {
    async fn submit_feedback(&self, request: &FeedbackRequest) -> PortResult<Feedback> {
        self.client.post("/generate", request).await
    }

    async fn fetch_history(&self, student_id: i64) -> PortResult<Vec<Feedback>> {
        self.client.get(&format!("/history/{}", student_id)).await
    }

    async fn fetch_latest(&self, student_id: i64) -> PortResult<Feedback> {
        self.client.get(&format!("/latest/{}", student_id)).await
    }

    async fn fetch_recommendations(&self, student_id: i64) -> PortResult<Vec<Recommendation>> {
        self.client.get(&format!("/recommendations/{}", student_id)).await
    }
}
