pub mod adapters;
pub mod client;
pub mod config;
pub mod error;

pub use client::ApiClient;
pub use config::Config;
pub use error::ClientError;
