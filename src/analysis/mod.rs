//! Email risk analysis
//!
//! Builds the structured-output request for a generative service, parses
//! the answer into an [`AnalysisResult`] and runs analyses in a background
//! actor so the UI never blocks on the network.

mod actor;
pub(crate) mod client;
mod error;
mod prompts;
mod types;

pub use actor::{AnalysisActorHandle, AnalysisCommand, AnalysisEvent, spawn_analysis_actor};
pub use client::{Analyzer, GeminiClient};
pub use error::AnalysisError;
pub use types::{AnalysisResult, RedFlag, RiskLevel, Severity};
