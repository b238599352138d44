//! Embedding-based keyword extraction.
//!
//! Candidates are the distinct lowercased words of a text (two or more
//! characters, stop words removed). Each candidate is embedded on its own and
//! scored by cosine similarity against the embedding of the whole text.

use std::{collections::HashSet, time::Instant};

use ndarray::ArrayView1;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

#[cfg(feature = "embeddings")]
use std::sync::Mutex;

#[cfg(feature = "embeddings")]
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::{
    config::Device,
    error::{AnalysisError, Result},
    nlp::{lexicon, models::KeywordModelName, vectors::cosine, vectors::Vectors},
};

/// Ranked keyword with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub keyword: String,
    pub score: f32,
}

static CANDIDATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid candidate regex"));

enum Embedder {
    Hashing(Vectors),
    #[cfg(feature = "embeddings")]
    FastEmbed(Mutex<TextEmbedding>),
    /// Same vector for every input.
    #[cfg(test)]
    Constant(Vec<f32>),
}

impl Embedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        match self {
            Embedder::Hashing(vectors) => Ok(texts
                .iter()
                .map(|text| {
                    let words = CANDIDATE_PATTERN.find_iter(text).map(|m| m.as_str());
                    vectors.mean(words).to_vec()
                })
                .collect()),
            #[cfg(feature = "embeddings")]
            Embedder::FastEmbed(model) => {
                let mut model = model
                    .lock()
                    .map_err(|_| AnalysisError::Keywords("embedding model poisoned".into()))?;
                model
                    .embed(texts.to_vec(), None)
                    .map_err(|err| AnalysisError::Keywords(err.to_string()))
            }
            #[cfg(test)]
            Embedder::Constant(vector) => Ok(vec![vector.clone(); texts.len()]),
        }
    }
}

/// Loaded keyword-extraction model.
pub struct KeywordModel {
    name: KeywordModelName,
    stop_words: HashSet<&'static str>,
    embedder: Embedder,
}

impl std::fmt::Debug for KeywordModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordModel").field("name", &self.name).finish()
    }
}

impl KeywordModel {
    /// Build the hashing-embedding keyword model, independent of any
    /// downloaded weights.
    pub fn hashing(name: KeywordModelName) -> Self {
        let language = if name.is_multilingual() { "xx" } else { "en" };
        let stop_words = lexicon::stop_words(language);
        let vectors = Vectors::build(
            name.embedding_width(),
            0x6b65_7977_6f72_6473,
            stop_words.iter().copied(),
        );
        Self {
            name,
            stop_words,
            embedder: Embedder::Hashing(vectors),
        }
    }

    /// Load the keyword model for `name`.
    ///
    /// With the `embeddings` feature the sentence-transformer weights are
    /// fetched through fastembed; otherwise the hashing embedder is used.
    pub fn load(name: KeywordModelName, device: &Device) -> Result<Self> {
        let start = Instant::now();
        let model = Self::load_backend(name)?;
        info!(
            keyword_model = %name,
            %device,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built keyword model"
        );
        Ok(model)
    }

    #[cfg(not(feature = "embeddings"))]
    fn load_backend(name: KeywordModelName) -> Result<Self> {
        Ok(Self::hashing(name))
    }

    #[cfg(feature = "embeddings")]
    fn load_backend(name: KeywordModelName) -> Result<Self> {
        let model = match name {
            KeywordModelName::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            KeywordModelName::ParaphraseMultilingualMiniLmL12V2 => {
                EmbeddingModel::ParaphraseMLMiniLML12V2
            }
        };
        let embedding = TextEmbedding::try_new(InitOptions::new(model)).map_err(|err| {
            AnalysisError::Load {
                model: name.to_string(),
                reason: err.to_string(),
            }
        })?;
        let hashing = Self::hashing(name);
        Ok(Self {
            embedder: Embedder::FastEmbed(Mutex::new(embedding)),
            ..hashing
        })
    }

    pub fn name(&self) -> KeywordModelName {
        self.name
    }

    /// Up to `top_n` keywords, highest score first; equal scores keep the
    /// order of first occurrence in `text`.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Result<Vec<Keyword>> {
        let candidates = self.candidates(text);
        if candidates.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }

        let mut inputs: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        inputs.push(text);
        inputs.extend(candidates.iter().map(String::as_str));
        let embeddings = self.embedder.embed(&inputs)?;
        let (doc, words) = embeddings
            .split_first()
            .ok_or_else(|| AnalysisError::Keywords("embedder returned no vectors".into()))?;
        let doc = ArrayView1::from(doc.as_slice());

        let mut scored: Vec<Keyword> = candidates
            .into_iter()
            .zip(words)
            .map(|(keyword, embedding)| Keyword {
                score: cosine(doc, ArrayView1::from(embedding.as_slice())),
                keyword,
            })
            .collect();
        // Stable sort keeps first-occurrence order among ties.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_n);
        Ok(scored)
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        CANDIDATE_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
            .filter(|word| !self.stop_words.contains(word.as_str()))
            .filter(|word| seen.insert(word.clone()))
            .collect()
    }
}
