pub mod domain;
pub mod ports;

pub use domain::{
    ChatRequest, ChatResponse, Difficulty, Envelope, ExplainRequest, Explanation, Feedback,
    FeedbackRequest, Hint, HintRequest, Recommendation, StudentProfile, DEFAULT_MATERIALS_TOPIC,
};
pub use ports::{
    ExplainService, FeedbackService, HintService, LearningBotService, PortError, PortResult,
};
