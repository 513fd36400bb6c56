use indexmap::IndexMap;
use num::Float;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{corpus::CorpusStats, term::TermFrequency, tfidf::TfIdfEngine};
use crate::utils::math::vector::SparseVec;

/// Learned weight of one vocabulary dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermWeight<N> {
    /// IDF weight
    pub idf: N,
    /// number of corpus documents containing the term
    pub doc_freq: u64,
}

/// Vocabulary
/// Fixed map from term (unigram or bigram) to dimension index, plus the IDF
/// weight of every dimension. The dimension of a term is its position in the map.
/// Built once at fit time, never grown by queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Serialize", deserialize = "N: Deserialize<'de>"))]
pub struct Vocabulary<N> {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<Box<str>, TermWeight<N>>,
}

impl<N> Vocabulary<N>
where
    N: Float,
{
    /// Select the `max_features` most frequent terms of the corpus (all of them
    /// when `max_features` is `None`) and weight them with engine `E`
    pub fn build<E>(stats: &CorpusStats, max_features: Option<usize>) -> Self
    where
        E: TfIdfEngine<N>,
    {
        let doc_num = stats.get_doc_num();
        let terms = stats
            .most_frequent_terms(max_features)
            .into_iter()
            .map(|(term, counts)| {
                (
                    Box::<str>::from(term),
                    TermWeight {
                        idf: E::idf(doc_num, counts.doc_freq),
                        doc_freq: counts.doc_freq,
                    },
                )
            })
            .collect();
        Self { terms }
    }

    /// Project a term frequency onto this vocabulary as a TF-IDF vector
    /// Terms outside the vocabulary are ignored. The result is not normalized.
    pub fn project<E>(&self, freq: &TermFrequency) -> SparseVec<N>
    where
        E: TfIdfEngine<N>,
    {
        let term_sum = freq.term_sum();
        let pairs = freq
            .iter()
            .filter_map(|(term, count)| {
                self.terms.get_full(term).map(|(dim, _, weight)| {
                    (dim as u32, E::tf(count, term_sum) * weight.idf)
                })
            })
            .collect();
        SparseVec::from_unsorted(pairs)
    }

    /// Dimension index of a term
    #[inline]
    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at a dimension index
    #[inline]
    pub fn term(&self, dim: usize) -> Option<&str> {
        self.terms.get_index(dim).map(|(term, _)| term.as_ref())
    }

    /// IDF weight of a term
    pub fn idf(&self, term: &str) -> Option<N> {
        self.terms.get(term).map(|w| w.idf)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// Number of dimensions
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate (term, weight) in dimension order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermWeight<N>)> + '_ {
        self.terms.iter().map(|(term, weight)| (term.as_ref(), weight))
    }
}
