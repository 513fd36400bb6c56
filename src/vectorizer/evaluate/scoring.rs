use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// One scored corpus entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEntry {
    /// corpus index
    pub index: usize,
    /// cosine similarity in [0, 1]
    pub similarity: f64,
}

/// Structure to store scoring results
/// Holds one entry per corpus document together with the normalized query.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    /// normalized query text the scores were computed from
    pub processed_question: String,
    pub list: Vec<HitEntry>,
}

impl Hits {
    /// Create a new Hits instance
    /// Similarities are clamped to [0, 1], NaN becomes 0
    pub fn new(processed_question: String, similarities: impl IntoIterator<Item = f64>) -> Self {
        let list = similarities
            .into_iter()
            .enumerate()
            .map(|(index, s)| HitEntry {
                index,
                similarity: if s.is_nan() { 0.0 } else { s.clamp(0.0, 1.0) },
            })
            .collect();
        Hits {
            processed_question,
            list,
        }
    }

    /// Sort by descending similarity, ties by ascending corpus index
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.index.cmp(&b.index))
        });
        self
    }

    /// Highest ranked entry (call after sorting)
    pub fn best(&self) -> Option<&HitEntry> {
        self.list.first()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HitEntry> + '_ {
        self.list.iter()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits ({:?}) [", self.processed_question)?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6}", hit.index, hit.similarity)?;
            }
            write!(f, "]")
        } else {
            f.debug_struct("Hits")
                .field("processed_question", &self.processed_question)
                .field("list", &self.list)
                .finish()
        }
    }
}

impl Display for Hits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{:.6}\t{}", hit.similarity, hit.index)?;
        }
        Ok(())
    }
}

/// Best match decision for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub index: usize,
    pub question: String,
    pub similarity: f64,
    pub processed_question: String,
    pub threshold: f64,
    /// `similarity >= threshold`
    pub is_match: bool,
}

/// Ranked candidate for debug output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub index: usize,
    pub question: String,
    pub similarity: f64,
}

/// Top ranked candidates for a query, best first
/// Empty when the matcher has not been fitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityAnalysis {
    pub processed_question: String,
    pub top_matches: Vec<RankedMatch>,
}

impl SimilarityAnalysis {
    pub fn is_empty(&self) -> bool {
        self.top_matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top_matches.len()
    }
}
