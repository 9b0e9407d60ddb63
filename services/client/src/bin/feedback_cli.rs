//! services/client/src/bin/feedback_cli.rs
//!
//! Command-line front-end for the AI Feedback service. Each subcommand performs
//! one client operation and prints the returned payload as JSON on stdout.

use ai_feedback_core::domain::{
    ChatRequest, Difficulty, ExplainRequest, FeedbackRequest, HintRequest,
};
use clap::{Parser, Subcommand};
use feedback_client_lib::{ApiClient, ClientError, Config};
use serde::Serialize;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Client for the AI Feedback tutoring service")]
struct Cli {
    /// Service host, overriding API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit an answer and get AI feedback on it
    Feedback {
        #[arg(long)]
        student_id: i64,
        #[arg(long)]
        question_id: i64,
        #[arg(long)]
        question_text: String,
        #[arg(long)]
        student_answer: String,
        #[arg(long)]
        correct_answer: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
    },

    /// List a student's feedback history
    History { student_id: i64 },

    /// Show a student's most recent feedback
    Latest { student_id: i64 },

    /// List suggested next topics for a student
    Recommendations { student_id: i64 },

    /// Send a message to the learning bot
    Chat {
        student_id: i64,
        message: String,
        /// Topic the student is currently studying
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        /// Learning material the bot should explain against
        #[arg(long)]
        context: Option<String>,
    },

    /// Show a student's learning profile
    Profile { student_id: i64 },

    /// Get suggested study materials
    Materials {
        student_id: i64,
        #[arg(long)]
        topic: Option<String>,
    },

    /// Ask for a hint on a question
    Hint {
        #[arg(long)]
        student_id: i64,
        #[arg(long)]
        question_id: i64,
        #[arg(long)]
        question_text: String,
        #[arg(long)]
        correct_answer: String,
        #[arg(long)]
        topic: String,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        /// Maximum number of hints for this question
        #[arg(long)]
        hint_limit: Option<u32>,
    },

    /// List hints given to a student for one question
    HintHistory { student_id: i64, question_id: i64 },

    /// Ask for an explanation of a learning material
    Explain {
        student_id: i64,
        material_id: i64,
        question: String,
    },

    /// List explanations given to a student for one material
    ExplainHistory { student_id: i64, material_id: i64 },

    /// Fetch profile, latest feedback and recommendations at once
    Overview { student_id: i64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Using AI Feedback service at {}", config.base_url);

    // --- 2. Build the Client & Dispatch ---
    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Command::Feedback {
            student_id,
            question_id,
            question_text,
            student_answer,
            correct_answer,
            topic,
            subject,
            difficulty,
        } => {
            let request = FeedbackRequest {
                student_id,
                question_id,
                question_text,
                student_answer,
                correct_answer,
                topic,
                difficulty,
                subject,
            };
            print_json(&client.feedback.submit_feedback(&request).await?)
        }
        Command::History { student_id } => {
            print_json(&client.feedback.fetch_history(student_id).await?)
        }
        Command::Latest { student_id } => {
            print_json(&client.feedback.fetch_latest(student_id).await?)
        }
        Command::Recommendations { student_id } => {
            print_json(&client.feedback.fetch_recommendations(student_id).await?)
        }
        Command::Chat {
            student_id,
            message,
            topic,
            subject,
            context,
        } => {
            let request = ChatRequest {
                student_id,
                message,
                learning_material_context: context,
                current_topic: topic,
                subject,
            };
            print_json(&client.learning_bot.send_chat_message(&request).await?)
        }
        Command::Profile { student_id } => {
            print_json(&client.learning_bot.fetch_profile(student_id).await?)
        }
        Command::Materials { student_id, topic } => {
            let materials = client
                .learning_bot
                .fetch_materials(student_id, topic.as_deref())
                .await?;
            print_json(&materials)
        }
        Command::Hint {
            student_id,
            question_id,
            question_text,
            correct_answer,
            topic,
            subject,
            difficulty,
            hint_limit,
        } => {
            let request = HintRequest {
                student_id,
                question_id,
                question_text,
                correct_answer,
                subject,
                topic,
                difficulty,
                hint_limit,
            };
            print_json(&client.hint.generate_hint(&request).await?)
        }
        Command::HintHistory {
            student_id,
            question_id,
        } => print_json(
            &client
                .hint
                .fetch_hint_history(student_id, question_id)
                .await?,
        ),
        Command::Explain {
            student_id,
            material_id,
            question,
        } => {
            let request = ExplainRequest {
                student_id,
                material_id,
                student_question: question,
            };
            print_json(&client.explain.generate_explanation(&request).await?)
        }
        Command::ExplainHistory {
            student_id,
            material_id,
        } => print_json(
            &client
                .explain
                .fetch_explanation_history(student_id, material_id)
                .await?,
        ),
        Command::Overview { student_id } => print_json(&client.overview(student_id).await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ClientError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
