//! crates/ai_feedback_core/src/domain.rs
//!
//! Defines the data-transfer records exchanged with the AI Feedback service.
//! Every record maps one-to-one onto a JSON body; none of them carry behavior
//! beyond decoding rules.

use crate::ports::{PortError, PortResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topic sent to the materials endpoint when the caller does not name one.
pub const DEFAULT_MATERIALS_TOPIC: &str = "Tổng hợp";

/// Envelope statuses that signal failure even when the HTTP status was 2xx.
const FAILURE_STATUSES: [&str; 4] = ["error", "fail", "failed", "failure"];

//=========================================================================================
// Response Envelope
//=========================================================================================

/// The uniform `{status, message, data}` wrapper returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, deserialize_with = "status_code")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the envelope's own status reports success.
    ///
    /// Numeric codes succeed only in the 2xx range. Textual codes succeed unless
    /// they name a failure. An empty status is treated as success because the
    /// HTTP layer has already gated the response.
    pub fn is_success(&self) -> bool {
        let status = self.status.trim();
        if let Ok(code) = status.parse::<i64>() {
            return (200..300).contains(&code);
        }
        !FAILURE_STATUSES
            .iter()
            .any(|failure| status.eq_ignore_ascii_case(failure))
    }

    /// Unwraps the payload, converting a failed or empty envelope into an error.
    pub fn into_data(self) -> PortResult<T> {
        if !self.is_success() {
            return Err(PortError::Rejected {
                status: self.status,
                message: self.message,
            });
        }
        self.data.ok_or(PortError::MissingData(self.message))
    }
}

/// Accepts the status either as a JSON string or as a JSON number.
fn status_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStatus {
        Text(String),
        Code(i64),
    }

    Ok(match Option::<RawStatus>::deserialize(deserializer)? {
        Some(RawStatus::Text(text)) => text,
        Some(RawStatus::Code(code)) => code.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Absent, `null` and `""` all mean "nothing to show".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

//=========================================================================================
// AI Feedback Records
//=========================================================================================

/// Difficulty level of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}', expected easy, medium or hard",
                other
            )),
        }
    }
}

/// A student's answer submitted for AI feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub student_id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub student_answer: String,
    pub correct_answer: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub subject: String,
}

/// Feedback generated for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub feedback_text: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub hint: Option<String>,
}

/// A suggested next topic. List order is display order only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub next_topic: String,
    pub explanation: String,
}

//=========================================================================================
// AI Learning Bot Records
//=========================================================================================

/// A message sent to the learning bot. `None` fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub student_id: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_material_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl ChatRequest {
    pub fn new(student_id: i64, message: impl Into<String>) -> Self {
        Self {
            student_id,
            message: message.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub student_id: i64,
    pub user_message: String,
    pub ai_response: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_materials: Option<String>,
    /// Server-assigned ISO-8601 time, carried as received.
    pub timestamp: String,
}

/// Learning analytics the server keeps for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub student_id: i64,
    pub total_attempts: u32,
    pub correct_answers: u32,
    /// Percentage in `[0, 100]`, computed by the server.
    pub accuracy: f64,
    pub strengths: String,
    pub weaknesses: String,
    pub recommended_difficulty: String,
    pub recommended_next_topic: String,
}

//=========================================================================================
// AI Hint and AI Explain Records
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub student_id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub correct_answer: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// Upper bound on hints for this question; the server default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub hint_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub hint: String,
    /// How many hints the student has requested for this question so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A student's question about a piece of learning material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub student_id: i64,
    pub material_id: i64,
    pub student_question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub explain_id: i64,
    pub student_id: i64,
    pub material_id: i64,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Envelope<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn successful_envelope_yields_payload() {
        let env: Envelope<Feedback> = envelope(json!({
            "status": "OK",
            "message": "done",
            "data": {
                "id": 7,
                "studentId": 1,
                "questionId": 101,
                "feedbackText": "Check your arithmetic.",
                "hint": "Try counting on fingers."
            }
        }));

        let feedback = env.into_data().unwrap();
        assert_eq!(feedback.id, 7);
        assert_eq!(feedback.feedback_text, "Check your arithmetic.");
        assert_eq!(feedback.hint.as_deref(), Some("Try counting on fingers."));
    }

    #[test]
    fn numeric_status_is_accepted() {
        let ok: Envelope<String> = envelope(json!({"status": 200, "message": "", "data": "x"}));
        assert!(ok.is_success());

        let not_found: Envelope<String> =
            envelope(json!({"status": 404, "message": "Feedback not found", "data": null}));
        assert!(!not_found.is_success());
        match not_found.into_data() {
            Err(PortError::Rejected { status, message }) => {
                assert_eq!(status, "404");
                assert_eq!(message, "Feedback not found");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_numeric_status_is_rejected() {
        for code in [-1, 70000, 500000] {
            let env: Envelope<String> =
                envelope(json!({"status": code, "message": "bad", "data": "stale"}));
            assert!(!env.is_success(), "status {} counted as success", code);
            assert!(matches!(env.into_data(), Err(PortError::Rejected { .. })));
        }
    }

    #[test]
    fn hint_limit_is_sent_only_when_set() {
        let mut request = HintRequest {
            student_id: 1,
            question_id: 101,
            question_text: "f'(x) = ?".into(),
            correct_answer: "2x + 3".into(),
            subject: "Math".into(),
            topic: "Derivatives".into(),
            difficulty: Difficulty::Medium,
            hint_limit: None,
        };
        assert!(serde_json::to_value(&request).unwrap().get("hintLimit").is_none());

        request.hint_limit = Some(3);
        assert_eq!(serde_json::to_value(&request).unwrap()["hintLimit"], json!(3));
    }

    #[test]
    fn textual_failure_status_is_rejected() {
        let env: Envelope<String> = envelope(json!({"status": "ERROR", "message": "boom"}));
        assert!(matches!(env.into_data(), Err(PortError::Rejected { .. })));
    }

    #[test]
    fn missing_data_on_success_is_an_error() {
        let env: Envelope<Feedback> = envelope(json!({"status": "OK", "message": "empty"}));
        assert!(matches!(env.into_data(), Err(PortError::MissingData(_))));

        let env: Envelope<Vec<Feedback>> =
            envelope(json!({"status": "OK", "message": "empty", "data": null}));
        assert!(matches!(env.into_data(), Err(PortError::MissingData(_))));
    }

    #[test]
    fn empty_list_is_a_valid_payload() {
        let env: Envelope<Vec<Recommendation>> =
            envelope(json!({"status": "OK", "message": "", "data": []}));
        assert_eq!(env.into_data().unwrap(), Vec::new());
    }

    #[test]
    fn empty_and_absent_hint_are_equivalent() {
        let base = json!({"id": 1, "studentId": 2, "questionId": 3, "feedbackText": "t"});

        let mut empty = base.clone();
        empty["hint"] = json!("");
        let mut null = base.clone();
        null["hint"] = serde_json::Value::Null;

        for value in [base, empty, null] {
            let feedback: Feedback = serde_json::from_value(value).unwrap();
            assert_eq!(feedback.hint, None);
        }
    }

    #[test]
    fn empty_suggested_materials_decode_as_none() {
        let response: ChatResponse = serde_json::from_value(json!({
            "studentId": 1,
            "userMessage": "hi",
            "aiResponse": "hello",
            "suggestedMaterials": "",
            "timestamp": "2024-05-01T10:00:00"
        }))
        .unwrap();
        assert_eq!(response.suggested_materials, None);
        assert_eq!(response.timestamp, "2024-05-01T10:00:00");
    }

    #[test]
    fn feedback_request_serializes_camel_case() {
        let request = FeedbackRequest {
            student_id: 1,
            question_id: 101,
            question_text: "2+2=?".into(),
            student_answer: "5".into(),
            correct_answer: "4".into(),
            topic: "Basic addition".into(),
            difficulty: Difficulty::Easy,
            subject: "Math".into(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "studentId": 1,
                "questionId": 101,
                "questionText": "2+2=?",
                "studentAnswer": "5",
                "correctAnswer": "4",
                "topic": "Basic addition",
                "difficulty": "easy",
                "subject": "Math"
            })
        );
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn chat_request_omits_unset_context() {
        let mut request = ChatRequest::new(3, "What is a derivative?");
        request.subject = Some("Math".into());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"studentId": 3, "message": "What is a derivative?", "subject": "Math"})
        );
    }

    #[test]
    fn negative_attempt_count_fails_to_decode() {
        let result = serde_json::from_value::<StudentProfile>(json!({
            "studentId": 1,
            "totalAttempts": -1,
            "correctAnswers": 0,
            "accuracy": 0.0,
            "strengths": "",
            "weaknesses": "",
            "recommendedDifficulty": "easy",
            "recommendedNextTopic": ""
        }));
        assert!(result.is_err());
    }
}
