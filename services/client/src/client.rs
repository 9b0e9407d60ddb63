//! services/client/src/client.rs
//!
//! Assembles the service adapters into a single handle for callers.

use crate::adapters::{
    build_http_client, HttpExplainAdapter, HttpFeedbackAdapter, HttpHintAdapter,
    HttpLearningBotAdapter,
};
use crate::config::Config;
use crate::error::ClientError;
use ai_feedback_core::ports::{
    ExplainService, FeedbackService, HintService, LearningBotService, PortResult,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// One handle per service group, all sharing a single HTTP connection pool.
///
/// Nothing here is mutable after construction, so the handle can be cloned into
/// concurrent tasks freely.
#[derive(Clone)]
pub struct ApiClient {
    pub feedback: Arc<dyn FeedbackService>,
    pub learning_bot: Arc<dyn LearningBotService>,
    pub hint: Arc<dyn HintService>,
    pub explain: Arc<dyn ExplainService>,
}

impl ApiClient {
    /// Builds HTTP adapters for every service group on the configured host.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let http = build_http_client()?;
        let base_url = config.base_url.as_str();

        Ok(Self {
            feedback: Arc::new(HttpFeedbackAdapter::new(http.clone(), base_url)),
            learning_bot: Arc::new(HttpLearningBotAdapter::new(http.clone(), base_url)),
            hint: Arc::new(HttpHintAdapter::new(http.clone(), base_url)),
            explain: Arc::new(HttpExplainAdapter::new(http, base_url)),
        })
    }

    /// Fetches profile, latest feedback and recommendations concurrently.
    ///
    /// Each section holds either its payload or `{"error": message}`. Fails only
    /// when all three requests fail.
    pub async fn overview(&self, student_id: i64) -> Result<Value, ClientError> {
        let (profile, latest, recommendations) = futures::future::join3(
            self.learning_bot.fetch_profile(student_id),
            self.feedback.fetch_latest(student_id),
            self.feedback.fetch_recommendations(student_id),
        )
        .await;

        if let (Err(profile), Err(latest), Err(recommendations)) =
            (&profile, &latest, &recommendations)
        {
            return Err(ClientError::Internal(format!(
                "no overview data could be fetched for student {} ({}; {}; {})",
                student_id, profile, latest, recommendations
            )));
        }

        Ok(json!({
            "studentId": student_id,
            "profile": section(profile)?,
            "latestFeedback": section(latest)?,
            "recommendations": section(recommendations)?,
        }))
    }
}

fn section<T: Serialize>(result: PortResult<T>) -> Result<Value, ClientError> {
    Ok(match result {
        Ok(value) => serde_json::to_value(value)?,
        Err(e) => json!({ "error": e.to_string() }),
    })
}
