//! FAQ corpus: the ordered question/answer pairs the matcher is fitted on.
//!
//! The corpus is loaded once at startup and never changes afterwards; an
//! entry's position is its index everywhere else.

pub mod chat;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FaqError, Result};

/// Sample corpus shipped with the crate
const BUNDLED_FAQS: &str = include_str!("../../data/faqs.json");

/// One question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered, non-empty list of FAQ entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqCorpus {
    entries: Vec<FaqEntry>,
}

/// TOML layout: a list of `[[faq]]` tables
#[derive(Deserialize)]
struct TomlCorpus {
    #[serde(default)]
    faq: Vec<FaqEntry>,
}

impl FaqCorpus {
    /// Build from entries, rejecting an empty list
    pub fn new(entries: Vec<FaqEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }
        Ok(Self { entries })
    }

    /// The sample programming FAQ bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_FAQS)
    }

    /// Parse a JSON array of `{"question": .., "answer": ..}` objects
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: Vec<FaqEntry> = serde_json::from_str(content)?;
        Self::new(entries)
    }

    /// Parse a TOML document of `[[faq]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let corpus: TomlCorpus = toml::from_str(content)?;
        Self::new(corpus.faq)
    }

    /// Load a `.json` or `.toml` corpus file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FaqError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let corpus = match extension.as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            _ => return Err(FaqError::UnsupportedFormat(path.to_path_buf())),
        };
        info!(path = %path.display(), entries = corpus.len(), "faq corpus loaded");
        Ok(corpus)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed corpus
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FaqEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn questions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.question.as_str()).collect()
    }

    pub fn answers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.answer.as_str()).collect()
    }
}
