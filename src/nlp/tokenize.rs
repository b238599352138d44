//! Regex tokenizer producing tokens with character offsets.

use once_cell::sync::Lazy;
use regex::Regex;

/// A token and its position in the source text.
///
/// `start`/`end` count characters, `byte_start`/`byte_end` index the UTF-8
/// buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub byte_start: usize,
    pub byte_end: usize,
    /// First token of a sentence.
    pub sent_start: bool,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.text.chars().any(char::is_alphabetic)
    }

    pub fn is_number(&self) -> bool {
        self.text.chars().next().is_some_and(|c| c.is_ascii_digit())
    }

    pub fn is_punct(&self) -> bool {
        !self.text.chars().any(char::is_alphanumeric)
    }

    pub fn is_title(&self) -> bool {
        let mut chars = self.text.chars();
        chars.next().is_some_and(char::is_uppercase)
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*|\w+(?:['’]\w+)*|\S").expect("valid token regex")
});

/// Split text into word, number and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut last_byte = 0;
    let mut last_char = 0;
    for found in TOKEN_PATTERN.find_iter(text) {
        let start = last_char + text[last_byte..found.start()].chars().count();
        let end = start + found.as_str().chars().count();
        let sent_start = tokens
            .last()
            .map_or(true, |prev| matches!(prev.text.as_str(), "." | "!" | "?"));
        tokens.push(Token {
            text: found.as_str().to_string(),
            start,
            end,
            byte_start: found.start(),
            byte_end: found.end(),
            sent_start,
        });
        last_byte = found.end();
        last_char = end;
    }
    tokens
}
