//! Matcher and chat configuration, loaded from TOML.
//!
//! ```toml
//! corpus_path = "data/faqs.json"
//!
//! [vectorizer]
//! max_features = 1000
//! ngram_range = [1, 2]
//!
//! [chat]
//! similarity_threshold = 0.15
//! top_matches = 5
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 1000;
/// Default similarity threshold for accepting a match
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.15;
/// Default length of the ranked debug trace
pub const DEFAULT_TOP_MATCHES: usize = 5;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// FAQ corpus file; the bundled corpus is used when absent
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FaqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.chat.validate()
    }
}

/// Vectorizer (fit time) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Maximum vocabulary size, 0 keeps every term
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
}

fn default_max_features() -> usize { DEFAULT_MAX_FEATURES }
fn default_ngram_range() -> (usize, usize) { (1, 2) }

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            ngram_range: default_ngram_range(),
        }
    }
}

impl VectorizerConfig {
    /// Vocabulary cap as an option, `None` meaning unlimited
    pub fn feature_limit(&self) -> Option<usize> {
        (self.max_features > 0).then_some(self.max_features)
    }

    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(FaqError::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        Ok(())
    }
}

/// Response assembly configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    #[serde(default = "default_top_matches")]
    pub top_matches: usize,
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    #[serde(default = "default_empty_question_message")]
    pub empty_question_message: String,
}

fn default_similarity_threshold() -> f64 { DEFAULT_SIMILARITY_THRESHOLD }
fn default_top_matches() -> usize { DEFAULT_TOP_MATCHES }
fn default_fallback_message() -> String {
    "I'm sorry, I couldn't find a good match for your question. Could you try rephrasing it or ask something else?".into()
}
fn default_empty_question_message() -> String { "Please ask a question!".into() }

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            top_matches: default_top_matches(),
            fallback_message: default_fallback_message(),
            empty_question_message: default_empty_question_message(),
        }
    }
}

impl ChatConfig {
    /// Thresholds outside [0, 1] are accepted, they only make every
    /// query match (below 0) or none (above 1). NaN is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.similarity_threshold.is_nan() {
            return Err(FaqError::InvalidConfig("similarity_threshold is NaN".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.vectorizer.max_features, 1000);
        assert_eq!(config.vectorizer.ngram_range, (1, 2));
        assert_eq!(config.chat.similarity_threshold, 0.15);
        assert_eq!(config.chat.top_matches, 5);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[chat]\nsimilarity_threshold = 0.3\n").unwrap();
        assert_eq!(config.chat.similarity_threshold, 0.3);
        assert_eq!(config.chat.top_matches, DEFAULT_TOP_MATCHES);
        assert_eq!(config.chat.empty_question_message, "Please ask a question!");
        assert_eq!(config.vectorizer, VectorizerConfig::default());
        assert!(config.corpus_path.is_none());
    }

    #[test]
    fn full_document() {
        let config = AppConfig::from_toml_str(
            r#"
            corpus_path = "faqs.toml"

            [vectorizer]
            max_features = 0
            ngram_range = [1, 3]
            "#,
        )
        .unwrap();
        assert_eq!(config.corpus_path, Some(PathBuf::from("faqs.toml")));
        assert_eq!(config.vectorizer.feature_limit(), None);
        assert_eq!(config.vectorizer.ngram_range, (1, 3));
    }

    #[test]
    fn rejects_bad_ngram_range() {
        for doc in ["[vectorizer]\nngram_range = [0, 2]", "[vectorizer]\nngram_range = [3, 2]"] {
            match AppConfig::from_toml_str(doc) {
                Err(FaqError::InvalidConfig(_)) => {}
                other => panic!("expected InvalidConfig, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[chat\nsimilarity_threshold = "),
            Err(FaqError::Toml(_))
        ));
    }

    #[test]
    fn feature_limit() {
        let config = VectorizerConfig::default();
        assert_eq!(config.feature_limit(), Some(1000));
    }
}
