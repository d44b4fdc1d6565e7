//! Traveller agent - LLM-backed travel planning
//!
//! Turns a short travel request (destination, duration, budget, style and
//! interests) into a multi-section plan by prompting a hosted language model
//! step by step, and serves it through a web form and JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod logging;
pub mod models;
pub mod planner;
pub mod web;

// Re-export core types for public API
pub use config::AgentConfig;
pub use error::TravelAiError;
pub use extract::{RawResponse, extract};
pub use llm::{GeminiClient, LanguageModel};
pub use models::{TravelPlan, TravelRequest};
pub use planner::{PlanStep, PromptBuilder, TripPlanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelAiError>;
