//! Deterministic hashed word vectors built from character trigrams.

use std::collections::HashMap;

use ndarray::{Array1, ArrayView1};

use crate::nlp::tokenize::Token;

/// Word vector table; words outside the precomputed vocabulary are hashed on
/// demand, so every word has a vector.
pub struct Vectors {
    width: usize,
    seed: u64,
    table: HashMap<String, Array1<f32>>,
}

impl Vectors {
    /// Build a table of `width`-dimensional vectors, precomputing `vocab`.
    pub fn build<'a>(width: usize, seed: u64, vocab: impl IntoIterator<Item = &'a str>) -> Self {
        let mut vectors = Self {
            width,
            seed,
            table: HashMap::new(),
        };
        let table: HashMap<String, Array1<f32>> = vocab
            .into_iter()
            .map(|word| {
                let word = word.to_lowercase();
                let vector = vectors.hash_word(&word);
                (word, vector)
            })
            .collect();
        vectors.table = table;
        vectors
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn vocab_size(&self) -> usize {
        self.table.len()
    }

    /// Unit vector for a word, looked up case-insensitively.
    pub fn vector(&self, word: &str) -> Array1<f32> {
        let word = word.to_lowercase();
        match self.table.get(&word) {
            Some(vector) => vector.clone(),
            None => self.hash_word(&word),
        }
    }

    /// Mean vector of the word and number tokens; zero when there are none.
    pub fn doc_vector(&self, tokens: &[Token]) -> Array1<f32> {
        self.mean(tokens.iter().filter(|t| !t.is_punct()).map(|t| t.text.as_str()))
    }

    /// Mean vector of arbitrary words.
    pub fn mean<'a>(&self, words: impl Iterator<Item = &'a str>) -> Array1<f32> {
        let mut sum = Array1::<f32>::zeros(self.width);
        let mut count = 0usize;
        for word in words {
            sum += &self.vector(word);
            count += 1;
        }
        if count > 0 {
            sum /= count as f32;
        }
        sum
    }

    fn hash_word(&self, word: &str) -> Array1<f32> {
        let padded: Vec<char> = format!("<{word}>").chars().collect();
        let mut vector = Array1::<f32>::zeros(self.width);
        let grams = padded.windows(3.min(padded.len()));
        for gram in grams {
            let gram: String = gram.iter().collect();
            let mut state = fnv1a(gram.as_bytes()) ^ self.seed;
            for value in vector.iter_mut() {
                state = splitmix64(state);
                *value += (state >> 40) as f32 / (1u64 << 23) as f32 - 1.0;
            }
        }
        // Whole-word component keeps distinct words apart even when they
        // share most trigrams.
        let mut state = fnv1a(word.as_bytes()).rotate_left(17) ^ self.seed;
        for value in vector.iter_mut() {
            state = splitmix64(state);
            *value += 2.0 * ((state >> 40) as f32 / (1u64 << 23) as f32 - 1.0);
        }
        normalize(vector)
    }
}

/// Cosine similarity; zero when either vector has no magnitude.
pub fn cosine(a: ArrayView1<f32>, b: ArrayView1<f32>) -> f32 {
    let dot = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

fn normalize(vector: Array1<f32>) -> Array1<f32> {
    let norm = vector.dot(&vector).sqrt();
    if norm == 0.0 {
        vector
    } else {
        vector / norm
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
