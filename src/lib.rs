//! Chat analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod nlp;
pub mod output;
pub mod processing;
pub mod server;

pub use config::Config;
pub use error::{ChatAnalyzerError, Result};
pub use processing::{AnalysisResponse, ChatAnalyzer};
