pub mod explain;
pub mod feedback;
pub mod hint;
pub mod learning_bot;
pub mod transport;

pub use explain::HttpExplainAdapter;
pub use feedback::HttpFeedbackAdapter;
pub use hint::HttpHintAdapter;
pub use learning_bot::HttpLearningBotAdapter;
pub use transport::{build_http_client, ServiceClient, ServiceGroup};
