//! Aggregation of language model output

pub mod aggregator;
pub mod analyzer;

pub use aggregator::{AnalysisResponse, EntityAggregate, NounAggregate, VerbAggregate};
pub use analyzer::ChatAnalyzer;
