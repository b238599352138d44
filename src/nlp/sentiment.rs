//! Lexicon-based sentiment component for English pipelines.

use indexmap::IndexMap;
use serde::Serialize;

use crate::nlp::{
    lexicon::{INTENSIFIERS, NEGATIONS, OPINION_WORDS},
    tokenize::Token,
};

/// Window size of the n-grams reported alongside sentiment.
const NGRAM_SIZE: usize = 3;

/// One opinion word together with the modifiers that preceded it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub words: Vec<String>,
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Sentiment produced for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    /// Mean polarity in [-1, 1].
    pub polarity: f64,
    /// Mean subjectivity in [0, 1].
    pub subjectivity: f64,
    pub assessments: Vec<Assessment>,
    pub ngrams: Vec<Vec<String>>,
    pub word_counts: IndexMap<String, usize>,
}

#[derive(Debug, Default)]
pub struct SentimentAnalyzer;

impl SentimentAnalyzer {
    pub fn analyze(&self, tokens: &[Token]) -> Sentiment {
        let words: Vec<String> = tokens
            .iter()
            .filter(|t| t.is_word() || t.is_number())
            .map(Token::lower)
            .collect();

        let mut assessments = Vec::new();
        let mut modifiers: Vec<String> = Vec::new();
        let mut negated = false;
        let mut intensity = 1.0;
        for word in &words {
            let bare = word.trim_end_matches("n't");
            if NEGATIONS.contains(&word.as_str()) || bare.len() != word.len() {
                negated = true;
                modifiers.push(word.clone());
                continue;
            }
            if let Some(factor) = INTENSIFIERS.get(word.as_str()) {
                intensity *= factor;
                modifiers.push(word.clone());
                continue;
            }
            if let Some(opinion) = OPINION_WORDS.get(word.as_str()) {
                let mut polarity = (opinion.polarity * opinion.intensity * intensity).clamp(-1.0, 1.0);
                if negated {
                    polarity *= -0.5;
                }
                let subjectivity = (opinion.subjectivity * intensity).clamp(0.0, 1.0);
                let mut assessed = std::mem::take(&mut modifiers);
                assessed.push(word.clone());
                assessments.push(Assessment {
                    words: assessed,
                    polarity,
                    subjectivity,
                });
            }
            modifiers.clear();
            negated = false;
            intensity = 1.0;
        }

        let (polarity, subjectivity) = if assessments.is_empty() {
            (0.0, 0.0)
        } else {
            let n = assessments.len() as f64;
            (
                assessments.iter().map(|a| a.polarity).sum::<f64>() / n,
                assessments.iter().map(|a| a.subjectivity).sum::<f64>() / n,
            )
        };

        let ngrams = words
            .windows(NGRAM_SIZE)
            .map(|window| window.to_vec())
            .collect();

        let mut word_counts = IndexMap::new();
        for word in words.iter().filter(|w| !w.chars().all(|c| c.is_ascii_digit())) {
            *word_counts.entry(word.clone()).or_insert(0) += 1;
        }

        Sentiment {
            polarity,
            subjectivity,
            assessments,
            ngrams,
            word_counts,
        }
    }
}
