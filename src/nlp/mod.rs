//! Natural language processing layer: model registry, caches and the
//! built-in pipelines.

pub mod cache;
pub mod keywords;
pub mod lexicon;
pub mod models;
pub mod ner;
pub mod pipeline;
pub mod sentiment;
pub mod tokenize;
pub mod vectors;

use crate::config::Device;

pub use cache::{ModelCache, ModelKey};
pub use keywords::{Keyword, KeywordModel};
pub use models::{KeywordModelName, ModelName};
pub use pipeline::{Component, Doc, Pipeline, TextRecord};

/// Cache of language pipelines.
pub type PipelineCache = ModelCache<ModelName, Pipeline>;

/// Cache of keyword-extraction models.
pub type KeywordModelCache = ModelCache<KeywordModelName, KeywordModel>;

/// Pipeline cache backed by the built-in loaders.
pub fn pipeline_cache(device: Device) -> PipelineCache {
    ModelCache::new("pipeline", move |name| Ok(Pipeline::load(name, &device)))
}

/// Keyword-model cache backed by the built-in loaders.
pub fn keyword_model_cache(device: Device) -> KeywordModelCache {
    ModelCache::new("keyword", move |name| KeywordModel::load(name, &device))
}
