//! crates/ai_feedback_core/src/ports.rs
//!
//! Defines the service contracts (traits) for talking to the AI Feedback backend.
//! Each trait covers one service group. Callers depend on these traits only, so the
//! HTTP transport can be swapped without touching the code that consumes it.

use async_trait::async_trait;
use crate::domain::{
    ChatRequest, ChatResponse, ExplainRequest, Explanation, Feedback, FeedbackRequest, Hint,
    HintRequest, Recommendation, StudentProfile,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// Every variant renders as a message that can be shown to a user as-is.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The service answered with a non-success HTTP status.
    #[error("Service responded with HTTP {code}: {message}")]
    Status { code: u16, message: String },
    /// The request never got a response (connection refused, DNS, reset).
    #[error("Could not reach the service: {0}")]
    Transport(String),
    /// The body was not JSON or did not have the expected shape.
    #[error("Malformed response from the service: {0}")]
    Decode(String),
    /// HTTP succeeded but the envelope's own status reports a failure.
    #[error("Service rejected the request ({status}): {message}")]
    Rejected { status: String, message: String },
    #[error("Service returned no data: {0}")]
    MissingData(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Generates feedback for a submitted answer.
    async fn submit_feedback(&self, request: &FeedbackRequest) -> PortResult<Feedback>;

    /// Lists a student's feedback in the order the server returns it.
    async fn fetch_history(&self, student_id: i64) -> PortResult<Vec<Feedback>>;

    async fn fetch_latest(&self, student_id: i64) -> PortResult<Feedback>;

    async fn fetch_recommendations(&self, student_id: i64) -> PortResult<Vec<Recommendation>>;
}

#[async_trait]
pub trait LearningBotService: Send + Sync {
    async fn send_chat_message(&self, request: &ChatRequest) -> PortResult<ChatResponse>;

    async fn fetch_profile(&self, student_id: i64) -> PortResult<StudentProfile>;

    /// Fetches free-text study materials. `None` falls back to
    /// [`DEFAULT_MATERIALS_TOPIC`](crate::domain::DEFAULT_MATERIALS_TOPIC).
    async fn fetch_materials(&self, student_id: i64, topic: Option<&str>) -> PortResult<String>;
}

#[async_trait]
pub trait HintService: Send + Sync {
    async fn generate_hint(&self, request: &HintRequest) -> PortResult<Hint>;

    async fn fetch_hint_history(&self, student_id: i64, question_id: i64) -> PortResult<Vec<Hint>>;
}

#[async_trait]
pub trait ExplainService: Send + Sync {
    /// Explains a piece of learning material in answer to a student's question.
    async fn generate_explanation(&self, request: &ExplainRequest) -> PortResult<Explanation>;

    /// Lists explanations oldest first, as the server orders them.
    async fn fetch_explanation_history(
        &self,
        student_id: i64,
        material_id: i64,
    ) -> PortResult<Vec<Explanation>>;
}
