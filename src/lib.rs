/// This crate is an FAQ question matcher using TF-IDF vectors and cosine similarity.
pub mod config;
pub mod error;
pub mod faq;
pub mod utils;
pub mod vectorizer;

/// FAQ Matcher
/// The top-level struct of this crate, providing the main matching features.
/// It is fitted once on the list of corpus questions and then scores free text
/// questions against every one of them.
///
/// Internally, it holds:
/// - The fitted vocabulary (term -> dimension, IDF)
/// - An L2 normalized TF-IDF vector for each corpus question
/// - The original and normalized corpus questions
///
/// `FaqMatcher<N, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32 or f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTfIdfEngine)
///
/// The matcher is `Untrained` until `fit` succeeds. Scoring an untrained
/// matcher fails with `MatcherError::NotTrained`, except `analyze` which
/// returns an empty analysis.
///
/// # Thread Safety
/// Scoring only borrows the matcher immutably, so a fitted matcher can be
/// shared among threads.
pub use vectorizer::FaqMatcher;

/// Matcher state and fitted model
/// - `MatcherState`: `Untrained` or `Trained(FittedModel)`
/// - `FittedModel`: vocabulary, questions and document vectors learned by `fit`
pub use vectorizer::{FittedModel, MatcherState};

/// FAQ Corpus
/// An ordered, non-empty list of question/answer pairs.
/// The position of an entry is its index in every match result.
///
/// Can be loaded from JSON or TOML files; a sample programming FAQ is bundled.
pub use faq::{FaqCorpus, FaqEntry};

/// FAQ Chatbot
/// Couples a corpus with a matcher fitted on its questions and assembles
/// replies: the answer of the best match above the similarity threshold, or a
/// fallback message, together with a debug trace of the top candidates.
///
/// Batch answering runs in parallel and keeps input order.
pub use faq::chat::{ChatPayload, ChatResponse, ChatStatistics, DebugInfo, FaqChatbot, SearchHit};

/// Text Normalizer
/// Lowercases, strips punctuation, tokenizes on whitespace and drops English
/// stop words and short tokens.
/// Used identically for corpus questions and user questions.
pub use utils::normalizer::{normalize, TextNormalizer};

/// Term Frequency structure
/// Counts the terms (unigrams and n-grams) of one document.
/// Used as base data for TF calculation.
pub use vectorizer::term::TermFrequency;

/// Vocabulary
/// The fitted term -> dimension mapping with the IDF of each term.
/// Limited to the most frequent terms of the corpus.
pub use vectorizer::vocabulary::Vocabulary;

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF weightings
/// into `FaqMatcher<N, E>`.
/// A default implementation, `DefaultTfIdfEngine`, uses raw counts for TF and
/// the smoothed `ln((1 + n) / (1 + df)) + 1` for IDF.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Match results
/// - `Hits`: similarity of the question against every corpus question, sortable by score
/// - `HitEntry`: a single corpus index and its similarity
/// - `MatchResult`: the best match and whether it clears the threshold
/// - `SimilarityAnalysis`: the top ranked candidates for debugging
/// - `RankedMatch`: a single candidate of the analysis
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, MatchResult, RankedMatch, SimilarityAnalysis};

/// Configuration
/// `AppConfig` is loaded from TOML; every field has a default.
pub use config::{AppConfig, ChatConfig, VectorizerConfig};

/// Errors
/// - `MatcherError`: errors of the matching core
/// - `FaqError`: errors of corpus loading, configuration and the chat layer
pub use error::{FaqError, MatcherError, Result};
