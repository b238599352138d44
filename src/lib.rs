//! Article analytics: named entities, sentiment, similarity and keywords for
//! batches of texts, served over HTTP.

pub mod api;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod nlp;
pub mod processor;
pub mod ui;

pub use error::AnalysisError;
pub use processor::{AnalysisResult, ProcessOptions, TextProcessor};
