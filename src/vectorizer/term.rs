use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how often each term (n-gram) occurs in one document.
/// Terms keep their first-seen order.
///
/// # Examples
/// ```
/// use faq_matcher::vectorizer::term::TermFrequency;
/// let tokens = ["virtual", "environment", "python"];
/// let freq = TermFrequency::from_ngrams(&tokens, (1, 2));
///
/// assert_eq!(freq.term_count("python"), 1);
/// assert_eq!(freq.term_count("virtual environment"), 1);
/// assert_eq!(freq.term_sum(), 5);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Count every n-gram of `tokens` whose length lies in `ngram_range` (inclusive)
    /// An n-gram is its tokens joined by a single space.
    /// Shorter n-grams come first, matching the order they are generated in.
    pub fn from_ngrams<T>(tokens: &[T], ngram_range: (usize, usize)) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = TermFrequency::new();
        let (min_n, max_n) = ngram_range;
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window
                    .iter()
                    .map(|t| t.as_ref())
                    .collect::<Vec<&str>>()
                    .join(" ");
                freq.add_term(&gram);
            }
        }
        freq
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }
}

/// Implementation for reading counts
impl TermFrequency {
    /// Occurrence count of a term, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Total number of counted terms (with repetition)
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term_count.is_empty()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Iterate (term, count) in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Distinct terms in first-seen order
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|s| s.as_str()).collect()
    }
}
