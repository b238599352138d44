//! Batch text processing: resolves models from the caches, runs the batch
//! through the pipeline and assembles one result record per text.

use std::{sync::Arc, time::Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::Device,
    error::Result,
    nlp::{
        self, ner::Span, sentiment::Sentiment, Component, KeywordModel, KeywordModelCache,
        KeywordModelName, ModelName, Pipeline, PipelineCache, TextRecord,
    },
};

pub const DEFAULT_MODEL: ModelName = ModelName::en_core_web_md;
pub const DEFAULT_LANGUAGE: &str = "en";
pub const KEYWORDS_DEFAULT: usize = 20;

/// Articles analysed by the built-in smoke test.
pub const SMOKE_TEST_TEXTS: [&str; 2] = [
    "Supply chain disruptions, triggered by factors including demand surges, high \
     transportation costs and pandemic-related lockdowns, are expected to continue well into \
     next year, experts predict. Companies are experiencing the brunt of the impact, with 36% \
     of small businesses responding to a 2021 U.S. Census survey reporting that they have \
     experienced delays with domestic suppliers. This has been costly. According to a 2020 \
     Statista survey, 41% of executives in the automotive and transportation industry alone \
     said their company lost $50 to $100 million due to supply chain issues.\n\n\
     There is no easy fix, but an emerging cohort of startups is pitching software as a way to \
     potentially anticipate and respond to market shocks. One, Tive, provides supply chain \
     visibility insights that help companies manage their in-transit shipments. Tive today \
     announced that it raised $54 million in a Series B financing round led by AXA Venture \
     Partners with participation from Sorenson Capital, Qualcomm Ventures, Fifth Wall, SJF \
     Ventures and Floating Point Ventures.",
    "April 11, 2022. Tive, the technology leader in the new era of supply chain and logistics \
     visibility, today announced the closing of a $54M Series B funding led by AXA Venture \
     Partners, with participation from Sorenson Capital, Qualcomm Ventures, Fifth Wall, SJF \
     Ventures and Floating Point Ventures as well as the existing investors RRE Ventures, Two \
     Sigma Ventures, NextView Ventures, Hyperplane Ventures, Broom Ventures, and Supply Chain \
     Ventures.\n\n\
     In 2021, Tive grew its revenue by over 300%, acquired more than 200 new customers and \
     expanded its global footprint. This latest investment will fuel rapidly growing \
     international presence, with the expansion of global sales and marketing initiatives. \
     As the leading provider of supply chain tracking technology, Tive has delivered real-time \
     shipment visibility in more than 200 countries, and helped save thousands of shipments \
     from being delayed, damaged, spoiled, or rejected.",
];

/// Per-request knobs; identifiers are validated by [`TextProcessor::process`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOptions {
    pub model: String,
    /// Falls back to the default keyword model of `language`.
    pub keyword_model: Option<String>,
    pub top_n: usize,
    pub language: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            keyword_model: None,
            top_n: KEYWORDS_DEFAULT,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Annotations produced for one input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    pub text_id: Option<Value>,
    pub entities: Vec<Span>,
    pub model: ModelName,
    pub language: String,
    pub pipeline_version: &'static str,
    pub pipeline_components: Vec<String>,
    /// Similarity to the previous text of the batch; absent for the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    #[serde(flatten)]
    pub sentiment: Option<Sentiment>,
    pub keywords: Vec<String>,
}

/// Runs batches through cached models.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    pipelines: Arc<PipelineCache>,
    keyword_models: Arc<KeywordModelCache>,
}

impl TextProcessor {
    pub fn new(pipelines: Arc<PipelineCache>, keyword_models: Arc<KeywordModelCache>) -> Self {
        Self {
            pipelines,
            keyword_models,
        }
    }

    /// Processor with empty caches backed by the built-in loaders.
    pub fn with_device(device: Device) -> Self {
        Self::new(
            Arc::new(nlp::pipeline_cache(device.clone())),
            Arc::new(nlp::keyword_model_cache(device)),
        )
    }

    pub fn pipelines(&self) -> &PipelineCache {
        &self.pipelines
    }

    pub fn keyword_models(&self) -> &KeywordModelCache {
        &self.keyword_models
    }

    /// Analyse `texts` in order. Model identifiers are validated before any
    /// load; an empty batch loads nothing.
    pub async fn process(
        &self,
        texts: Vec<TextRecord>,
        options: &ProcessOptions,
    ) -> Result<Vec<AnalysisResult>> {
        let model: ModelName = options.model.parse()?;
        let keyword_model = match &options.keyword_model {
            Some(name) => name.parse()?,
            None => KeywordModelName::default_for(&options.language),
        };
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let pipeline = self.pipelines.get_or_load(model).await?;
        let keyword_model = self.keyword_models.get_or_load(keyword_model).await?;
        let language = options.language.clone();
        let top_n = options.top_n;
        tokio::task::spawn_blocking(move || {
            analyze_batch(&pipeline, &keyword_model, texts, &language, top_n)
        })
        .await?
    }

    /// Fixed two-article batch through the default model.
    pub async fn smoke_test(&self) -> Result<Vec<AnalysisResult>> {
        let texts = SMOKE_TEST_TEXTS.iter().map(|text| TextRecord::new(*text)).collect();
        self.process(texts, &ProcessOptions::default()).await
    }
}

fn analyze_batch(
    pipeline: &Pipeline,
    keyword_model: &KeywordModel,
    texts: Vec<TextRecord>,
    language: &str,
    top_n: usize,
) -> Result<Vec<AnalysisResult>> {
    // The sentiment lexicon only covers English.
    let disabled: &[Component] = if language == DEFAULT_LANGUAGE {
        &[]
    } else {
        &[Component::Sentiment]
    };

    let ids: Vec<String> = texts
        .iter()
        .enumerate()
        .map(|(idx, record)| match &record.text_id {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => idx.to_string(),
        })
        .collect();

    let start = Instant::now();
    let docs = pipeline.pipe(texts, disabled);
    info!(
        ?ids,
        model = %pipeline.name(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done analytics"
    );

    let mut components: Vec<String> = pipeline
        .active_components(disabled)
        .iter()
        .map(ToString::to_string)
        .collect();
    components.push("keywords".to_string());

    let mut results = Vec::with_capacity(docs.len());
    for (idx, doc) in docs.iter().enumerate() {
        let similarity = idx.checked_sub(1).map(|prev| doc.similarity(&docs[prev]));

        let start = Instant::now();
        let keywords = keyword_model
            .extract_keywords(&doc.text, top_n)?
            .into_iter()
            .map(|keyword| keyword.keyword)
            .collect();
        debug!(
            text_id = %ids[idx],
            keyword_model = %keyword_model.name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "done keyword extraction"
        );

        results.push(AnalysisResult {
            text: doc.text.clone(),
            text_id: doc.text_id.clone(),
            entities: doc.ents.clone(),
            model: pipeline.name(),
            language: language.to_string(),
            pipeline_version: env!("CARGO_PKG_VERSION"),
            pipeline_components: components.clone(),
            similarity,
            sentiment: doc.sentiment.clone(),
            keywords,
        });
    }
    Ok(results)
}
