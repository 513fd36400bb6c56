pub mod corpus;
pub mod evaluate;
pub mod term;
pub mod tfidf;
pub mod vocabulary;

use std::marker::PhantomData;

use num::Float;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{VectorizerConfig, DEFAULT_TOP_MATCHES};
use crate::error::MatcherError;
use crate::utils::{math::vector::SparseVec, normalizer::TextNormalizer};
use crate::vectorizer::{
    corpus::CorpusStats,
    evaluate::scoring::{Hits, MatchResult, RankedMatch, SimilarityAnalysis},
    term::TermFrequency,
    tfidf::{DefaultTfIdfEngine, TfIdfEngine},
    vocabulary::Vocabulary,
};

/// State of a matcher
/// `Untrained` until `fit` succeeds, `Trained` afterwards.
#[derive(Debug, Clone)]
pub enum MatcherState<N>
where
    N: Float,
{
    Untrained,
    Trained(FittedModel<N>),
}

/// Everything learned by `fit`
/// `documents[i]` is the unit TF-IDF vector of `questions[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel<N>
where
    N: Float,
{
    /// original corpus questions, in corpus order
    pub questions: Vec<String>,
    pub vocabulary: Vocabulary<N>,
    /// L2 normalized document vectors
    pub documents: Vec<SparseVec<N>>,
}

/// FaqMatcher
/// Matches free text questions against a fixed list of corpus questions with
/// TF-IDF vectors and cosine similarity.
///
/// `FaqMatcher<N, E>` has the following generic parameters:
/// - `N`: vector element type (f32 or f64); similarities are always reported as f64
/// - `E`: TF-IDF weighting engine (default `DefaultTfIdfEngine`)
///
/// Scoring only needs `&self`, so a fitted matcher can be shared between
/// threads without locking.
#[derive(Debug, Clone)]
pub struct FaqMatcher<N = f64, E = DefaultTfIdfEngine>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    config: VectorizerConfig,
    normalizer: TextNormalizer,
    state: MatcherState<N>,
    _marker: PhantomData<E>,
}

impl<N, E> Default for FaqMatcher<N, E>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> FaqMatcher<N, E>
where
    N: Float,
    E: TfIdfEngine<N>,
{
    /// Create an untrained matcher with the default configuration
    pub fn new() -> Self {
        Self::with_config(VectorizerConfig::default())
    }

    /// Create an untrained matcher
    pub fn with_config(config: VectorizerConfig) -> Self {
        Self {
            config,
            normalizer: TextNormalizer::new(),
            state: MatcherState::Untrained,
            _marker: PhantomData,
        }
    }

    /// Learn the vocabulary and the document vectors from corpus questions
    /// Refitting replaces the previous state entirely.
    /// An empty question list is rejected and leaves the state untouched.
    pub fn fit<S>(&mut self, questions: &[S]) -> Result<(), MatcherError>
    where
        S: AsRef<str>,
    {
        if questions.is_empty() {
            return Err(MatcherError::EmptyCorpus);
        }

        let mut originals = Vec::with_capacity(questions.len());
        let mut freqs = Vec::with_capacity(questions.len());
        let mut stats = CorpusStats::new();
        for (index, question) in questions.iter().enumerate() {
            let question: &str = question.as_ref();
            let tokens = self.normalizer.tokens(question);
            if tokens.is_empty() {
                warn!(index, question, "corpus question normalizes to nothing");
            }
            let freq = TermFrequency::from_ngrams(&tokens, self.config.ngram_range);
            stats.add_doc(&freq);
            originals.push(question.to_string());
            freqs.push(freq);
        }

        let vocabulary = Vocabulary::build::<E>(&stats, self.config.feature_limit());
        let documents = freqs
            .iter()
            .map(|freq| {
                let mut vec = vocabulary.project::<E>(freq);
                vec.l2_normalize();
                vec
            })
            .collect::<Vec<_>>();

        info!(
            documents = documents.len(),
            corpus_terms = stats.vocab_size(),
            vocabulary = vocabulary.len(),
            "matcher fitted"
        );

        self.state = MatcherState::Trained(FittedModel {
            questions: originals,
            vocabulary,
            documents,
        });
        Ok(())
    }

    #[inline]
    pub fn is_trained(&self) -> bool {
        matches!(self.state, MatcherState::Trained(_))
    }

    pub fn state(&self) -> &MatcherState<N> {
        &self.state
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Fitted model, or `NotTrained`
    pub fn model(&self) -> Result<&FittedModel<N>, MatcherError> {
        match &self.state {
            MatcherState::Trained(model) => Ok(model),
            MatcherState::Untrained => Err(MatcherError::NotTrained),
        }
    }

    pub fn vocabulary(&self) -> Option<&Vocabulary<N>> {
        self.model().ok().map(|m| &m.vocabulary)
    }

    /// Number of fitted documents, 0 when untrained
    pub fn doc_num(&self) -> usize {
        self.model().map_or(0, |m| m.documents.len())
    }

    /// Normalize text with the matcher's normalizer
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Project a question onto the fitted vocabulary as a unit vector
    /// Questions without any known term give the zero vector.
    pub fn transform(&self, question: &str) -> Result<SparseVec<N>, MatcherError> {
        let model = self.model()?;
        let tokens = self.normalizer.tokens(question);
        Ok(self.query_vector(model, &tokens))
    }

    fn query_vector(&self, model: &FittedModel<N>, tokens: &[String]) -> SparseVec<N> {
        let freq = TermFrequency::from_ngrams(tokens, self.config.ngram_range);
        let mut vec = model.vocabulary.project::<E>(&freq);
        vec.l2_normalize();
        vec
    }

    /// Score a question against every corpus question
    /// Returns one entry per corpus question, sorted by descending similarity
    /// with ties broken by ascending corpus index.
    pub fn score(&self, question: &str) -> Result<Hits, MatcherError> {
        let model = self.model()?;
        let tokens = self.normalizer.tokens(question);
        let query = self.query_vector(model, &tokens);
        // f64 cosine over the stored values, exactly 1.0 for identical vectors
        let similarities = model.documents.iter().map(|doc| query.cosine_similarity(doc));
        let mut hits = Hits::new(tokens.join(" "), similarities);
        hits.sort_by_score_desc();
        debug!(
            processed_question = %hits.processed_question,
            known_terms = query.nnz(),
            best = hits.best().map_or(0.0, |h| h.similarity),
            "question scored"
        );
        Ok(hits)
    }

    /// Best matching corpus question
    /// `is_match` is `similarity >= threshold`; the threshold is not clamped.
    pub fn find_best_match(&self, question: &str, threshold: f64) -> Result<MatchResult, MatcherError> {
        let hits = self.score(question)?;
        self.match_result(&hits, threshold)
    }

    /// Top 5 candidates for debugging
    /// Never fails: an untrained matcher gives an empty analysis.
    pub fn analyze(&self, question: &str) -> SimilarityAnalysis {
        self.analyze_top(question, DEFAULT_TOP_MATCHES)
    }

    /// Top `top_k` candidates for debugging, empty when untrained
    pub fn analyze_top(&self, question: &str, top_k: usize) -> SimilarityAnalysis {
        match self.score(question) {
            Ok(hits) => self.analysis(&hits, top_k),
            Err(_) => SimilarityAnalysis::default(),
        }
    }

    /// Best match and top `top_k` analysis from a single scoring pass
    pub fn evaluate(
        &self,
        question: &str,
        threshold: f64,
        top_k: usize,
    ) -> Result<(MatchResult, SimilarityAnalysis), MatcherError> {
        let hits = self.score(question)?;
        Ok((self.match_result(&hits, threshold)?, self.analysis(&hits, top_k)))
    }

    fn match_result(&self, hits: &Hits, threshold: f64) -> Result<MatchResult, MatcherError> {
        let model = self.model()?;
        let best = hits.best().ok_or(MatcherError::EmptyCorpus)?;
        Ok(MatchResult {
            index: best.index,
            question: model.questions[best.index].clone(),
            similarity: best.similarity,
            processed_question: hits.processed_question.clone(),
            threshold,
            is_match: best.similarity >= threshold,
        })
    }

    fn analysis(&self, hits: &Hits, top_k: usize) -> SimilarityAnalysis {
        let Ok(model) = self.model() else {
            return SimilarityAnalysis::default();
        };
        SimilarityAnalysis {
            processed_question: hits.processed_question.clone(),
            top_matches: hits
                .iter()
                .take(top_k)
                .map(|hit| RankedMatch {
                    index: hit.index,
                    question: model.questions[hit.index].clone(),
                    similarity: hit.similarity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS: [&str; 5] = [
        "What is Python?",
        "How do I install Python?",
        "What is Git?",
        "How do I commit changes in Git?",
        "What is a database?",
    ];

    fn fitted() -> FaqMatcher {
        let mut matcher = FaqMatcher::new();
        matcher.fit(&QUESTIONS).unwrap();
        matcher
    }

    #[test]
    fn scoring_before_fit_fails() {
        let matcher: FaqMatcher = FaqMatcher::new();
        assert!(!matcher.is_trained());
        assert_eq!(matcher.score("python").unwrap_err(), MatcherError::NotTrained);
        assert_eq!(matcher.find_best_match("python", 0.1).unwrap_err(), MatcherError::NotTrained);
        assert_eq!(matcher.transform("python").unwrap_err(), MatcherError::NotTrained);
        assert!(matcher.evaluate("python", 0.1, 5).is_err());
        assert!(matcher.analyze("python").is_empty());
        assert_eq!(matcher.doc_num(), 0);
    }

    #[test]
    fn fit_empty_corpus_is_rejected() {
        let mut matcher: FaqMatcher = FaqMatcher::new();
        let empty: [&str; 0] = [];
        assert_eq!(matcher.fit(&empty), Err(MatcherError::EmptyCorpus));
        assert!(!matcher.is_trained());
    }

    #[test]
    fn fit_keeps_index_alignment() {
        let matcher = fitted();
        let model = matcher.model().unwrap();
        assert_eq!(model.documents.len(), QUESTIONS.len());
        assert_eq!(model.questions[3], QUESTIONS[3]);
        assert_eq!(matcher.normalize(QUESTIONS[3]), "commit changes git");
        let vocab_len = model.vocabulary.len() as u32;
        for doc in &model.documents {
            assert!(doc.iter().all(|(dim, _)| dim < vocab_len));
            assert!((doc.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn score_returns_every_index_once() {
        let matcher = fitted();
        let hits = matcher.score("install git").unwrap();
        let mut indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..QUESTIONS.len()).collect::<Vec<_>>());
        assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.similarity)));
    }

    #[test]
    fn verbatim_question_matches_itself() {
        let matcher = fitted();
        for (index, question) in QUESTIONS.iter().enumerate() {
            let best = matcher.find_best_match(question, 0.5).unwrap();
            assert_eq!(best.index, index, "{question}");
            assert!((best.similarity - 1.0).abs() < 1e-9);
            assert!(best.is_match);
        }
    }

    #[test]
    fn unknown_words_score_zero_everywhere() {
        let matcher = fitted();
        let hits = matcher.score("asdkjaslkdj").unwrap();
        assert!(hits.iter().all(|h| h.similarity == 0.0));
        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert!(matcher.transform("asdkjaslkdj").unwrap().is_empty());
    }

    #[test]
    fn empty_and_stop_word_queries_do_not_fail() {
        let matcher = fitted();
        for query in ["", "   ", "?!?", "what is the"] {
            let best = matcher.find_best_match(query, 0.15).unwrap();
            assert_eq!(best.similarity, 0.0);
            assert!(!best.is_match);
            assert_eq!(best.processed_question, "");
        }
    }

    #[test]
    fn threshold_is_compared_inclusively() {
        let matcher = fitted();
        let exact = matcher.find_best_match("What is Python?", 1.0).unwrap();
        assert!(exact.similarity >= 1.0 - 1e-9);
        let none = matcher.find_best_match("asdkjaslkdj", 0.0).unwrap();
        assert!(none.is_match, "0.0 >= 0.0 accepts");
        let negative = matcher.find_best_match("asdkjaslkdj", -1.0).unwrap();
        assert!(negative.is_match);
        assert_eq!(negative.threshold, -1.0);
    }

    #[test]
    fn analyze_is_top_five_of_score() {
        let mut matcher: FaqMatcher = FaqMatcher::new();
        let questions: Vec<String> = (0..8).map(|i| format!("question number{i} python")).collect();
        matcher.fit(&questions).unwrap();
        let analysis = matcher.analyze("python number3");
        assert_eq!(analysis.len(), 5);
        assert_eq!(analysis.top_matches[0].index, 3);
        let hits = matcher.score("python number3").unwrap();
        for (ranked, hit) in analysis.top_matches.iter().zip(hits.iter()) {
            assert_eq!(ranked.index, hit.index);
            assert_eq!(ranked.similarity, hit.similarity);
        }
    }

    #[test]
    fn evaluate_matches_separate_calls() {
        let matcher = fitted();
        let (best, analysis) = matcher.evaluate("How can I install python", 0.15, 5).unwrap();
        assert_eq!(best, matcher.find_best_match("How can I install python", 0.15).unwrap());
        assert_eq!(analysis, matcher.analyze("How can I install python"));
        assert_eq!(best.index, 1);
    }

    #[test]
    fn refit_replaces_state() {
        let mut matcher = fitted();
        matcher.fit(&["What is Rust?"]).unwrap();
        assert_eq!(matcher.doc_num(), 1);
        assert_eq!(matcher.find_best_match("rust", 0.1).unwrap().question, "What is Rust?");
        assert!(matcher.vocabulary().unwrap().contains("rust"));
        assert!(!matcher.vocabulary().unwrap().contains("python"));
    }

    #[test]
    fn single_entry_and_empty_entry_corpora_fit() {
        let mut matcher: FaqMatcher = FaqMatcher::new();
        matcher.fit(&["What is it?"]).unwrap();
        assert!(matcher.vocabulary().unwrap().is_empty());
        let best = matcher.find_best_match("anything at all", 0.15).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.similarity, 0.0);

        matcher.fit(&["", "What is Git?"]).unwrap();
        assert_eq!(matcher.find_best_match("git", 0.15).unwrap().index, 1);
    }

    #[test]
    fn vocabulary_is_capped() {
        let config = VectorizerConfig {
            max_features: 2,
            ..VectorizerConfig::default()
        };
        let mut matcher: FaqMatcher = FaqMatcher::with_config(config);
        matcher.fit(&QUESTIONS).unwrap();
        assert_eq!(matcher.vocabulary().unwrap().len(), 2);
    }

    #[test]
    fn single_precision_matcher() {
        let mut matcher: FaqMatcher<f32> = FaqMatcher::new();
        matcher.fit(&QUESTIONS).unwrap();
        let best = matcher.find_best_match("tell me about git", 0.15).unwrap();
        assert_eq!(best.index, 2);
        assert!(best.is_match);
    }

    #[test]
    fn single_precision_verbatim_questions_score_one() {
        let corpus = crate::faq::FaqCorpus::bundled().unwrap();
        let questions = corpus.questions();
        let mut matcher: FaqMatcher<f32> = FaqMatcher::new();
        matcher.fit(&questions).unwrap();
        for (index, question) in questions.iter().enumerate() {
            let best = matcher.find_best_match(question, 1.0).unwrap();
            assert_eq!(best.index, index, "{question}");
            assert_eq!(best.similarity, 1.0, "{question}");
            assert!(best.is_match, "{question}");
        }
    }

    #[test]
    fn fitted_model_serializes() {
        let matcher = fitted();
        let json = serde_json::to_string(matcher.model().unwrap()).unwrap();
        let model: FittedModel<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(model.questions, QUESTIONS);
        assert_eq!(model.documents, matcher.model().unwrap().documents);
        assert_eq!(model.vocabulary.len(), matcher.vocabulary().unwrap().len());
    }
}
