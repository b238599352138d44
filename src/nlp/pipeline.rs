//! Loaded language pipeline: tokenizer, entity recognizer, optional
//! sentiment component and document vectors.

use std::{fmt, time::Instant};

use ndarray::Array1;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{
    config::Device,
    nlp::{
        lexicon,
        models::ModelName,
        ner::{Ner, RuleNer, Span},
        sentiment::{Sentiment, SentimentAnalyzer},
        tokenize::{tokenize, Token},
        vectors::{cosine, Vectors},
    },
};

/// Named stage of a pipeline; names appear in analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Tok2vec,
    Ner,
    Sentiment,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Tok2vec => "tok2vec",
            Component::Ner => "ner",
            Component::Sentiment => "sentiment",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input unit: bare text or text with a caller-supplied id.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRecord {
    pub text: String,
    pub text_id: Option<Value>,
}

impl TextRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_id: None,
        }
    }

    pub fn with_id(text: impl Into<String>, text_id: Value) -> Self {
        Self {
            text: text.into(),
            text_id: Some(text_id),
        }
    }
}

/// Processed document.
pub struct Doc {
    pub text: String,
    pub text_id: Option<Value>,
    pub tokens: Vec<Token>,
    pub ents: Vec<Span>,
    pub sentiment: Option<Sentiment>,
    vector: Array1<f32>,
}

impl Doc {
    /// Cosine similarity of the two documents' mean token vectors.
    pub fn similarity(&self, other: &Doc) -> f32 {
        if self.vector.len() != other.vector.len() {
            return 0.0;
        }
        cosine(self.vector.view(), other.vector.view())
    }

    pub fn vector(&self) -> &Array1<f32> {
        &self.vector
    }
}

/// Immutable pipeline shared by every request once loaded.
pub struct Pipeline {
    name: ModelName,
    device: Device,
    components: Vec<Component>,
    ner: Box<dyn Ner>,
    sentiment: Option<SentimentAnalyzer>,
    vectors: Vectors,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("device", &self.device)
            .field("components", &self.components)
            .field("vocab", &self.vectors.vocab_size())
            .finish()
    }
}

impl Pipeline {
    /// Construct the pipeline for `name`. English models also get the
    /// sentiment component.
    pub fn load(name: ModelName, device: &Device) -> Self {
        let start = Instant::now();
        let language = name.language();
        let stop_words = lexicon::stop_words(language);
        let vocab = stop_words
            .iter()
            .copied()
            .chain(lexicon::GAZETTEER.keys().copied())
            .chain(lexicon::OPINION_WORDS.keys().copied());
        let vectors = Vectors::build(name.vector_width(), seed_for(name), vocab);

        let mut components = vec![Component::Tok2vec, Component::Ner];
        let sentiment = if name.is_english() {
            components.push(Component::Sentiment);
            Some(SentimentAnalyzer)
        } else {
            None
        };

        let pipeline = Self {
            name,
            device: device.clone(),
            components,
            ner: Box::new(RuleNer::new(name.label_scheme(), language)),
            sentiment,
            vectors,
        };
        info!(
            model = %name,
            %device,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built pipeline"
        );
        pipeline
    }

    pub fn name(&self) -> ModelName {
        self.name
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Components that run when `disabled` are switched off.
    pub fn active_components(&self, disabled: &[Component]) -> Vec<Component> {
        self.components
            .iter()
            .copied()
            .filter(|c| !disabled.contains(c))
            .collect()
    }

    /// Run a batch through the pipeline, preserving input order.
    pub fn pipe(&self, records: Vec<TextRecord>, disabled: &[Component]) -> Vec<Doc> {
        let run_ner = !disabled.contains(&Component::Ner);
        let sentiment = self
            .sentiment
            .as_ref()
            .filter(|_| !disabled.contains(&Component::Sentiment));
        let run_vectors = !disabled.contains(&Component::Tok2vec);

        records
            .into_iter()
            .map(|record| {
                let tokens = tokenize(&record.text);
                let ents = if run_ner {
                    self.ner.extract(&record.text, &tokens)
                } else {
                    Vec::new()
                };
                let sentiment = sentiment.map(|analyzer| analyzer.analyze(&tokens));
                let vector = if run_vectors {
                    self.vectors.doc_vector(&tokens)
                } else {
                    Array1::zeros(self.vectors.width())
                };
                Doc {
                    text: record.text,
                    text_id: record.text_id,
                    tokens,
                    ents,
                    sentiment,
                    vector,
                }
            })
            .collect()
    }
}

fn seed_for(name: ModelName) -> u64 {
    // Models of one language share a vector space so sizes only differ in width.
    name.language()
        .bytes()
        .fold(0x5eed_u64, |seed, byte| seed.rotate_left(8) ^ u64::from(byte))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_models_carry_sentiment() {
        let pipeline = Pipeline::load(ModelName::en_core_web_sm, &Device::Cpu);
        assert_eq!(
            pipeline.components(),
            &[Component::Tok2vec, Component::Ner, Component::Sentiment]
        );
        let finnish = Pipeline::load(ModelName::fi_core_news_sm, &Device::Cpu);
        assert!(!finnish.components().contains(&Component::Sentiment));
    }

    #[test]
    fn pipe_preserves_order_and_ids() {
        let pipeline = Pipeline::load(ModelName::en_core_web_sm, &Device::Cpu);
        let docs = pipeline.pipe(
            vec![
                TextRecord::with_id("First text.", Value::from("a")),
                TextRecord::new("Second text."),
            ],
            &[],
        );
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "First text.");
        assert_eq!(docs[0].text_id, Some(Value::from("a")));
        assert_eq!(docs[1].text_id, None);
    }

    #[test]
    fn disabling_sentiment_skips_it() {
        let pipeline = Pipeline::load(ModelName::en_core_web_md, &Device::Cpu);
        let docs = pipeline.pipe(vec![TextRecord::new("A great day.")], &[Component::Sentiment]);
        assert!(docs[0].sentiment.is_none());
        assert_eq!(
            pipeline.active_components(&[Component::Sentiment]),
            vec![Component::Tok2vec, Component::Ner]
        );
    }

    #[test]
    fn similarity_is_bounded() {
        let pipeline = Pipeline::load(ModelName::en_core_web_sm, &Device::Cpu);
        let docs = pipeline.pipe(
            vec![
                TextRecord::new("Apple was founded in 1976."),
                TextRecord::new("Apple released a new phone."),
            ],
            &[],
        );
        let similarity = docs[1].similarity(&docs[0]);
        assert!((-1.0..=1.0).contains(&similarity));
    }
}
