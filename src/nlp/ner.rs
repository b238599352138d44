//! Rule-based named entity recognizer: gazetteer lookups, numeric patterns
//! and capitalised-sequence heuristics.

use std::collections::HashSet;

use serde::Serialize;

use crate::nlp::{
    lexicon::{self, EntityClass, CURRENCY_SYMBOLS, ENGLISH_MONTHS, ORG_SUFFIXES, SCALE_WORDS},
    models::LabelScheme,
    tokenize::Token,
};

/// Extracted entity span with character offsets relative to the source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

/// Trait for NER implementations.
pub trait Ner: Send + Sync {
    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<Span>;
}

/// Connectors allowed inside a capitalised name ("Bank of America").
const NAME_CONNECTORS: &[&str] = &["of", "&", "de", "van", "von"];

pub struct RuleNer {
    scheme: LabelScheme,
    english_dates: bool,
    stop_words: HashSet<&'static str>,
}

impl RuleNer {
    pub fn new(scheme: LabelScheme, language: &str) -> Self {
        Self {
            scheme,
            english_dates: language == "en" || language == "xx",
            stop_words: lexicon::stop_words(language),
        }
    }

    fn label(&self, class: EntityClass) -> Option<&'static str> {
        match self.scheme {
            LabelScheme::OntoNotes => Some(match class {
                EntityClass::Person => "PERSON",
                EntityClass::Org => "ORG",
                EntityClass::Place => "GPE",
                EntityClass::Nationality => "NORP",
                EntityClass::Date => "DATE",
                EntityClass::Money => "MONEY",
                EntityClass::Percent => "PERCENT",
                EntityClass::Cardinal => "CARDINAL",
            }),
            LabelScheme::WikiNer => match class {
                EntityClass::Person => Some("PER"),
                EntityClass::Org => Some("ORG"),
                EntityClass::Place => Some("LOC"),
                EntityClass::Nationality => Some("MISC"),
                _ => None,
            },
        }
    }

    fn is_month(&self, token: &Token) -> bool {
        self.english_dates && token.is_title() && ENGLISH_MONTHS.contains(&token.lower().as_str())
    }

    /// Numeric entity starting at `i`: returns (class, last token index).
    fn numeric_at(&self, tokens: &[Token], i: usize) -> Option<(EntityClass, usize)> {
        let token = &tokens[i];
        let next = tokens.get(i + 1);

        if CURRENCY_SYMBOLS.contains(&token.text.as_str()) {
            let amount = next.filter(|t| t.is_number())?;
            let mut end = i + 1;
            if let Some(scale) = tokens.get(i + 2) {
                if adjacent_or_spaced(amount, scale) && is_scale(scale) {
                    end = i + 2;
                }
            }
            return Some((EntityClass::Money, end));
        }

        if self.is_month(token) {
            let day_or_year = next.filter(|t| t.is_number())?;
            let mut end = i + 1;
            if !is_year(day_or_year) {
                match (tokens.get(i + 2), tokens.get(i + 3)) {
                    (Some(comma), Some(year)) if comma.text == "," && is_year(year) => end = i + 3,
                    (Some(year), _) if is_year(year) => end = i + 2,
                    _ => {}
                }
            }
            return Some((EntityClass::Date, end));
        }

        if !token.is_number() {
            return None;
        }
        if let Some(next) = next {
            if next.text == "%" || next.lower() == "percent" {
                return Some((EntityClass::Percent, i + 1));
            }
            if self.is_month(next) {
                let end = match tokens.get(i + 2) {
                    Some(year) if is_year(year) => i + 2,
                    _ => i + 1,
                };
                return Some((EntityClass::Date, end));
            }
        }
        if is_year(token) {
            return Some((EntityClass::Date, i));
        }
        let end = if next.is_some_and(is_scale) { i + 1 } else { i };
        Some((EntityClass::Cardinal, end))
    }

    /// Capitalised run starting at `i`: returns (class, first, last) token indices.
    fn name_at(&self, text: &str, tokens: &[Token], i: usize) -> Option<(EntityClass, usize, usize)> {
        if !tokens[i].is_title() || !tokens[i].is_word() {
            return None;
        }
        let mut last = i;
        let mut j = i + 1;
        while j < tokens.len() {
            let token = &tokens[j];
            if token.is_title() && token.is_word() && !self.is_month(token) {
                last = j;
                j += 1;
                continue;
            }
            let bridges = NAME_CONNECTORS.contains(&token.lower().as_str())
                && tokens
                    .get(j + 1)
                    .is_some_and(|after| after.is_title() && after.is_word());
            if !bridges {
                break;
            }
            j += 1;
        }

        let mut first = i;
        while first <= last && self.stop_words.contains(tokens[first].lower().as_str()) {
            first += 1;
        }
        if first > last {
            return None;
        }

        let phrase = text[tokens[first].byte_start..tokens[last].byte_end].to_lowercase();
        if let Some(class) = lexicon::GAZETTEER.get(phrase.as_str()) {
            return Some((*class, first, last));
        }

        let single = first == last;
        let head = &tokens[first];
        if single && head.sent_start && appears_lowercase(text, &head.lower()) {
            return None;
        }
        if single && self.is_month(head) {
            return None;
        }

        let tail = tokens[last].lower();
        let class = if ORG_SUFFIXES.contains(&tail.as_str()) {
            EntityClass::Org
        } else if let Some(class) = (first..=last)
            .find_map(|k| lexicon::GAZETTEER.get(tokens[k].lower().as_str()).copied())
        {
            class
        } else if !single && last - first < 3 {
            EntityClass::Person
        } else {
            EntityClass::Org
        };
        Some((class, first, last))
    }
}

impl Ner for RuleNer {
    fn extract(&self, text: &str, tokens: &[Token]) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            if let Some((class, end)) = self.numeric_at(tokens, i) {
                if let Some(label) = self.label(class) {
                    spans.push(make_span(text, &tokens[i], &tokens[end], label));
                }
                i = end + 1;
                continue;
            }
            if let Some((class, first, last)) = self.name_at(text, tokens, i) {
                if let Some(label) = self.label(class) {
                    spans.push(make_span(text, &tokens[first], &tokens[last], label));
                }
                i = last + 1;
                continue;
            }
            i += 1;
        }
        spans
    }
}

fn make_span(text: &str, first: &Token, last: &Token, label: &str) -> Span {
    Span {
        text: text[first.byte_start..last.byte_end].to_string(),
        label: label.to_string(),
        start: first.start,
        end: last.end,
    }
}

fn is_year(token: &Token) -> bool {
    token.text.len() == 4
        && token
            .text
            .parse::<u16>()
            .is_ok_and(|year| (1000..=2100).contains(&year))
}

fn is_scale(token: &Token) -> bool {
    SCALE_WORDS.contains(&token.lower().as_str())
}

fn adjacent_or_spaced(left: &Token, right: &Token) -> bool {
    right.byte_start >= left.byte_end && right.byte_start - left.byte_end <= 1
}

/// Whether the word also occurs uncapitalised, which marks a sentence-initial
/// capital as orthographic rather than a name.
fn appears_lowercase(text: &str, word: &str) -> bool {
    text.match_indices(word).any(|(pos, _)| {
        let before_ok = text[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[pos + word.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
