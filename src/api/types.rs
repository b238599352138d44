//! Request and response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    nlp::TextRecord,
    processor::{ProcessOptions, DEFAULT_LANGUAGE, DEFAULT_MODEL, KEYWORDS_DEFAULT},
};

/// Body of `POST /process`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub texts: Option<Vec<TextInput>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub keyword_model: Option<String>,
    /// Number of keywords per text.
    #[serde(default)]
    pub keywords: Option<usize>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A text given either bare or with an id to echo back.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Plain(String),
    Tagged {
        text: String,
        #[serde(default, alias = "id")]
        text_id: Option<Value>,
    },
}

impl From<TextInput> for TextRecord {
    fn from(value: TextInput) -> Self {
        match value {
            TextInput::Plain(text) => TextRecord::new(text),
            TextInput::Tagged { text, text_id } => TextRecord {
                text,
                text_id: text_id.filter(|id| !id.is_null()),
            },
        }
    }
}

impl ProcessRequest {
    /// Split into texts and options; empty strings and a zero keyword count
    /// fall back to the defaults.
    pub fn into_parts(self) -> (Vec<TextRecord>, ProcessOptions) {
        let texts = self
            .texts
            .unwrap_or_default()
            .into_iter()
            .map(TextRecord::from)
            .collect();
        let options = ProcessOptions {
            model: non_empty(self.model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            keyword_model: non_empty(self.keyword_model),
            top_n: self.keywords.filter(|n| *n > 0).unwrap_or(KEYWORDS_DEFAULT),
            language: non_empty(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        };
        (texts, options)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_plain_and_tagged_texts() {
        let request: ProcessRequest = serde_json::from_value(json!({
            "texts": ["plain", {"text": "tagged", "text_id": 7}, {"text": "aliased", "id": "a"}]
        }))
        .unwrap();
        let (texts, options) = request.into_parts();
        assert_eq!(texts[0], TextRecord::new("plain"));
        assert_eq!(texts[1], TextRecord::with_id("tagged", json!(7)));
        assert_eq!(texts[2], TextRecord::with_id("aliased", json!("a")));
        assert_eq!(options, ProcessOptions::default());
    }

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let request: ProcessRequest = serde_json::from_value(json!({
            "texts": null, "model": "", "keywords": 0, "language": ""
        }))
        .unwrap();
        let (texts, options) = request.into_parts();
        assert!(texts.is_empty());
        assert_eq!(options.model, "en_core_web_md");
        assert_eq!(options.top_n, 20);
        assert_eq!(options.language, "en");
    }

    #[test]
    fn explicit_options_are_kept() {
        let request: ProcessRequest = serde_json::from_value(json!({
            "texts": [], "model": "sv_core_news_sm", "keyword_model": "all-MiniLM-L6-v2",
            "keywords": 5, "language": "sv"
        }))
        .unwrap();
        let (_, options) = request.into_parts();
        assert_eq!(options.model, "sv_core_news_sm");
        assert_eq!(options.keyword_model.as_deref(), Some("all-MiniLM-L6-v2"));
        assert_eq!(options.top_n, 5);
        assert_eq!(options.language, "sv");
    }
}
