//! Chat response assembly on top of a fitted matcher.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AppConfig, ChatConfig, VectorizerConfig};
use crate::error::Result;
use crate::faq::FaqCorpus;
use crate::vectorizer::{evaluate::scoring::RankedMatch, FaqMatcher};

/// Debug trace attached to every answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub processed_question: String,
    pub similarity_threshold: f64,
    pub top_matches: Vec<RankedMatch>,
}

/// Reply to one user question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    /// best similarity, also when the match was rejected
    pub confidence: f64,
    /// matched FAQ question, `None` when rejected
    pub matched_question: Option<String>,
    pub is_match: bool,
    /// `None` for blank questions
    pub debug_info: Option<DebugInfo>,
}

/// Failure message for a blank chat message
pub const EMPTY_MESSAGE_ERROR: &str = "Please enter a message";

/// JSON shape returned to web clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatPayload {
    Reply {
        success: bool,
        response: String,
        confidence: f64,
        matched_question: Option<String>,
        is_match: bool,
        debug_info: Option<DebugInfo>,
    },
    Failure {
        success: bool,
        message: String,
    },
}

impl ChatPayload {
    pub fn failure(message: impl Into<String>) -> Self {
        ChatPayload::Failure {
            success: false,
            message: message.into(),
        }
    }
}

impl From<ChatResponse> for ChatPayload {
    fn from(response: ChatResponse) -> Self {
        ChatPayload::Reply {
            success: true,
            response: response.answer,
            confidence: response.confidence,
            matched_question: response.matched_question,
            is_match: response.is_match,
            debug_info: response.debug_info,
        }
    }
}

/// FAQ entry found by `search_faqs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub index: usize,
    pub question: String,
    pub answer: String,
    pub similarity: f64,
}

/// Summary of a chatbot instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStatistics {
    pub total_faqs: usize,
    pub vocabulary_size: usize,
    pub similarity_threshold: f64,
    pub max_features: usize,
    pub ngram_range: (usize, usize),
}

/// FaqChatbot
/// Owns the corpus and a matcher fitted on its questions, and turns match
/// results into replies. Built once at startup, then shared read-only by
/// every request.
#[derive(Debug, Clone)]
pub struct FaqChatbot {
    corpus: FaqCorpus,
    matcher: FaqMatcher,
    config: ChatConfig,
}

impl FaqChatbot {
    /// Fit a matcher on the corpus questions
    pub fn new(corpus: FaqCorpus, vectorizer: VectorizerConfig, config: ChatConfig) -> Result<Self> {
        vectorizer.validate()?;
        config.validate()?;
        let mut matcher = FaqMatcher::with_config(vectorizer);
        matcher.fit(&corpus.questions())?;
        Ok(Self {
            corpus,
            matcher,
            config,
        })
    }

    /// Load the configured corpus (or the bundled one) and fit
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let corpus = match &config.corpus_path {
            Some(path) => FaqCorpus::load(path)?,
            None => FaqCorpus::bundled()?,
        };
        Self::new(corpus, config.vectorizer, config.chat.clone())
    }

    /// Answer one question
    pub fn get_response(&self, question: &str) -> Result<ChatResponse> {
        if question.trim().is_empty() {
            return Ok(ChatResponse {
                answer: self.config.empty_question_message.clone(),
                confidence: 0.0,
                matched_question: None,
                is_match: false,
                debug_info: None,
            });
        }

        let threshold = self.config.similarity_threshold;
        let (best, analysis) = self.matcher.evaluate(question, threshold, self.config.top_matches)?;
        debug!(index = best.index, similarity = best.similarity, is_match = best.is_match, "best match");

        let (answer, matched_question) = match self.corpus.get(best.index) {
            Some(entry) if best.is_match => (entry.answer.clone(), Some(best.question)),
            _ => (self.config.fallback_message.clone(), None),
        };
        Ok(ChatResponse {
            answer,
            confidence: best.similarity,
            matched_question,
            is_match: best.is_match,
            debug_info: Some(DebugInfo {
                processed_question: analysis.processed_question,
                similarity_threshold: threshold,
                top_matches: analysis.top_matches,
            }),
        })
    }

    /// Answer one question as a JSON payload
    /// A blank message is a failure payload rather than a reply.
    pub fn payload(&self, message: &str) -> Result<ChatPayload> {
        if message.trim().is_empty() {
            return Ok(ChatPayload::failure(EMPTY_MESSAGE_ERROR));
        }
        Ok(self.get_response(message)?.into())
    }

    /// Answer many questions in parallel, results in input order
    pub fn answer_batch<S>(&self, questions: &[S]) -> Vec<Result<ChatResponse>>
    where
        S: AsRef<str> + Sync,
    {
        questions
            .par_iter()
            .map(|question| {
                let question: &str = question.as_ref();
                self.get_response(question)
            })
            .collect()
    }

    /// FAQ entries sharing at least one term with the query, best first
    pub fn search_faqs(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let hits = self.matcher.score(query)?;
        Ok(hits
            .iter()
            .filter(|hit| hit.similarity > 0.0)
            .take(limit)
            .filter_map(|hit| {
                self.corpus.get(hit.index).map(|entry| SearchHit {
                    index: hit.index,
                    question: entry.question.clone(),
                    answer: entry.answer.clone(),
                    similarity: hit.similarity,
                })
            })
            .collect())
    }

    pub fn statistics(&self) -> ChatStatistics {
        let vectorizer = self.matcher.config();
        ChatStatistics {
            total_faqs: self.corpus.len(),
            vocabulary_size: self.matcher.vocabulary().map_or(0, |v| v.len()),
            similarity_threshold: self.config.similarity_threshold,
            max_features: vectorizer.max_features,
            ngram_range: vectorizer.ngram_range,
        }
    }

    pub fn corpus(&self) -> &FaqCorpus {
        &self.corpus
    }

    pub fn matcher(&self) -> &FaqMatcher {
        &self.matcher
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}
