//! Core domain models and rendering logic for query analysis reports

pub mod analysis;
#[cfg(feature = "ssr")]
pub mod analyze_api;
pub mod clipboard;
#[cfg(feature = "ssr")]
pub mod config;
pub mod extract;
pub mod report;
pub mod submission;

pub use analysis::{AnalysisResult, AnalyzeRequest};
pub use submission::{RequestGeneration, ResultView, submit_query};
