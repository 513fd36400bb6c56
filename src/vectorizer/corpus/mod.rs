use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term::TermFrequency;

/// Per-term statistics over the whole corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounts {
    /// number of documents containing the term
    pub doc_freq: u64,
    /// occurrences of the term summed over all documents
    pub total: u64,
}

/// keep document count and term counts for IDF and vocabulary selection
/// Terms keep their first-seen order across the corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    /// number of documents added
    pub doc_num: u64,
    // term counts in corpus
    #[serde(with = "indexmap::map::serde_seq")]
    pub term_counts: IndexMap<Box<str>, TermCounts>,
}

impl CorpusStats {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            match self.term_counts.get_mut(term) {
                Some(counts) => {
                    counts.doc_freq += 1;
                    counts.total += count;
                }
                None => {
                    self.term_counts.insert(
                        term.into(),
                        TermCounts {
                            doc_freq: 1,
                            total: count,
                        },
                    );
                }
            }
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing `term`
    pub fn get_doc_freq(&self, term: &str) -> u64 {
        self.term_counts.get(term).map_or(0, |c| c.doc_freq)
    }

    /// Get the current vocabulary size (number of unique terms)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    /// The `limit` most frequent terms by total corpus occurrences, descending
    /// Ties keep first-seen order. `None` keeps every term.
    pub fn most_frequent_terms(&self, limit: Option<usize>) -> Vec<(&str, TermCounts)> {
        let mut terms: Vec<(&str, TermCounts)> = self
            .term_counts
            .iter()
            .map(|(term, counts)| (term.as_ref(), *counts))
            .collect();
        // stable sort keeps first-seen order between equal totals
        terms.sort_by(|a, b| b.1.total.cmp(&a.1.total));
        if let Some(limit) = limit {
            terms.truncate(limit);
        }
        terms
    }
}
