//! Registry of the pipeline and keyword models the service can load.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Identifier of a supported language pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ModelName {
    en_core_web_sm,
    en_core_web_md,
    en_core_web_lg,
    en_core_web_trf,
    xx_ent_wiki_sm,
    fi_core_news_sm,
    fi_core_news_lg,
    sv_core_news_sm,
    sv_core_news_lg,
}

/// Entity label inventory a model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScheme {
    /// PERSON / ORG / GPE / DATE / MONEY / PERCENT / CARDINAL ...
    OntoNotes,
    /// PER / ORG / LOC / MISC, used by the multilingual wiki model.
    WikiNer,
}

impl ModelName {
    pub const ALL: [ModelName; 9] = [
        ModelName::en_core_web_sm,
        ModelName::en_core_web_md,
        ModelName::en_core_web_lg,
        ModelName::en_core_web_trf,
        ModelName::xx_ent_wiki_sm,
        ModelName::fi_core_news_sm,
        ModelName::fi_core_news_lg,
        ModelName::sv_core_news_sm,
        ModelName::sv_core_news_lg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::en_core_web_sm => "en_core_web_sm",
            ModelName::en_core_web_md => "en_core_web_md",
            ModelName::en_core_web_lg => "en_core_web_lg",
            ModelName::en_core_web_trf => "en_core_web_trf",
            ModelName::xx_ent_wiki_sm => "xx_ent_wiki_sm",
            ModelName::fi_core_news_sm => "fi_core_news_sm",
            ModelName::fi_core_news_lg => "fi_core_news_lg",
            ModelName::sv_core_news_sm => "sv_core_news_sm",
            ModelName::sv_core_news_lg => "sv_core_news_lg",
        }
    }

    /// ISO language code, `xx` for the multilingual model.
    pub fn language(&self) -> &'static str {
        match self {
            ModelName::en_core_web_sm
            | ModelName::en_core_web_md
            | ModelName::en_core_web_lg
            | ModelName::en_core_web_trf => "en",
            ModelName::xx_ent_wiki_sm => "xx",
            ModelName::fi_core_news_sm | ModelName::fi_core_news_lg => "fi",
            ModelName::sv_core_news_sm | ModelName::sv_core_news_lg => "sv",
        }
    }

    pub fn is_english(&self) -> bool {
        self.language() == "en"
    }

    pub fn label_scheme(&self) -> LabelScheme {
        match self {
            ModelName::xx_ent_wiki_sm => LabelScheme::WikiNer,
            _ => LabelScheme::OntoNotes,
        }
    }

    /// Width of the token vectors used for document similarity.
    pub fn vector_width(&self) -> usize {
        match self {
            ModelName::en_core_web_sm | ModelName::xx_ent_wiki_sm => 96,
            ModelName::fi_core_news_sm | ModelName::sv_core_news_sm => 96,
            ModelName::en_core_web_md
            | ModelName::en_core_web_lg
            | ModelName::fi_core_news_lg
            | ModelName::sv_core_news_lg => 300,
            ModelName::en_core_web_trf => 768,
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelName::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| AnalysisError::UnknownModel(s.to_string()))
    }
}

/// Identifier of a supported keyword-extraction embedding model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordModelName {
    #[serde(rename = "all-MiniLM-L6-v2")]
    AllMiniLmL6V2,
    #[serde(rename = "paraphrase-multilingual-MiniLM-L12-v2")]
    ParaphraseMultilingualMiniLmL12V2,
}

impl KeywordModelName {
    pub const ALL: [KeywordModelName; 2] = [
        KeywordModelName::AllMiniLmL6V2,
        KeywordModelName::ParaphraseMultilingualMiniLmL12V2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordModelName::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            KeywordModelName::ParaphraseMultilingualMiniLmL12V2 => {
                "paraphrase-multilingual-MiniLM-L12-v2"
            }
        }
    }

    /// Default keyword model for a request language.
    pub fn default_for(language: &str) -> Self {
        if language == "en" {
            KeywordModelName::AllMiniLmL6V2
        } else {
            KeywordModelName::ParaphraseMultilingualMiniLmL12V2
        }
    }

    pub fn is_multilingual(&self) -> bool {
        matches!(self, KeywordModelName::ParaphraseMultilingualMiniLmL12V2)
    }

    pub fn embedding_width(&self) -> usize {
        384
    }
}

impl fmt::Display for KeywordModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordModelName {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeywordModelName::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| AnalysisError::UnknownKeywordModel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for model in ModelName::ALL {
            assert_eq!(model.as_str().parse::<ModelName>().unwrap(), model);
        }
        for model in KeywordModelName::ALL {
            assert_eq!(model.as_str().parse::<KeywordModelName>().unwrap(), model);
        }
    }

    #[test]
    fn unknown_model_is_rejected() {
        let err = "not_a_real_model".parse::<ModelName>().unwrap_err();
        assert!(err.to_string().contains("Unknown model"));
    }

    #[test]
    fn serde_names_match_display() {
        let json = serde_json::to_string(&KeywordModelName::AllMiniLmL6V2).unwrap();
        assert_eq!(json, "\"all-MiniLM-L6-v2\"");
        let json = serde_json::to_string(&ModelName::fi_core_news_lg).unwrap();
        assert_eq!(json, "\"fi_core_news_lg\"");
    }

    #[test]
    fn non_english_requests_default_to_multilingual_keywords() {
        assert_eq!(KeywordModelName::default_for("en"), KeywordModelName::AllMiniLmL6V2);
        assert!(KeywordModelName::default_for("fi").is_multilingual());
    }
}
