use num::Float;

/// TF-IDF weighting engine
/// Implement this trait to plug a different weighting scheme into `FaqMatcher<N, E>`.
pub trait TfIdfEngine<N>
where
    N: Float,
{
    /// IDF weight of a term
    /// # Arguments
    /// * `doc_num` - number of documents in the corpus
    /// * `doc_freq` - number of documents containing the term
    fn idf(doc_num: u64, doc_freq: u64) -> N;

    /// TF weight of a term inside one document (or query)
    /// # Arguments
    /// * `count` - occurrences of the term
    /// * `term_sum` - total term occurrences of the document
    fn tf(count: u64, term_sum: u64) -> N;
}

/// Default TF-IDF engine
/// TF is the raw count, IDF is the smoothed `ln((1 + n) / (1 + df)) + 1`
/// which stays strictly positive, so every present term carries weight.
/// Supports `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl<N> TfIdfEngine<N> for DefaultTfIdfEngine
where
    N: Float,
{
    #[inline]
    fn idf(doc_num: u64, doc_freq: u64) -> N {
        let idf = ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0;
        N::from(idf).unwrap_or_else(N::one)
    }

    #[inline]
    fn tf(count: u64, _term_sum: u64) -> N {
        N::from(count).unwrap_or_else(N::zero)
    }
}
