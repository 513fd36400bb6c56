use std::cmp::Ordering;

use num::{Float, NumCast};
use serde::{Deserialize, Serialize};

/// SparseVec
/// Sparse vector holding only non-zero elements.
/// `inds` and `vals` are kept as parallel arrays,
/// and `inds` is guaranteed to be strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVec<N>
where
    N: Float,
{
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> Default for SparseVec<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SparseVec<N>
where
    N: Float,
{
    /// Empty vector (the zero vector)
    pub fn new() -> Self {
        Self {
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from (index, value) pairs in any order
    /// Duplicate indices are summed, zero and non-finite values are dropped
    pub fn from_unsorted(mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|(idx, _)| *idx);
        let mut inds: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut vals: Vec<N> = Vec::with_capacity(pairs.len());
        for (idx, val) in pairs {
            match inds.last() {
                Some(&last) if last == idx => {
                    if let Some(prev) = vals.last_mut() {
                        *prev = *prev + val;
                    }
                }
                _ => {
                    inds.push(idx);
                    vals.push(val);
                }
            }
        }
        let mut vec = Self { inds, vals };
        vec.retain_non_zero();
        vec
    }

    fn retain_non_zero(&mut self) {
        let mut write = 0;
        for read in 0..self.vals.len() {
            let val = self.vals[read];
            if val != N::zero() && val.is_finite() {
                self.inds[write] = self.inds[read];
                self.vals[write] = val;
                write += 1;
            }
        }
        self.inds.truncate(write);
        self.vals.truncate(write);
    }

    /// Number of non-zero elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inds.is_empty()
    }

    /// Iterate (index, value) in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (u32, N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter().copied())
    }

    /// Squared euclidean norm, computed in f64
    fn norm_sq(&self) -> f64 {
        self.vals
            .iter()
            .map(|v| {
                let v = to_f64(*v);
                v * v
            })
            .sum::<f64>()
    }

    /// Euclidean norm, computed in f64
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Scale to unit length
    /// The zero vector stays the zero vector
    pub fn l2_normalize(&mut self) -> &mut Self {
        let norm = self.norm();
        if norm > 0.0 && norm.is_finite() {
            for val in &mut self.vals {
                *val = from_f64(to_f64(*val) / norm);
            }
        }
        self
    }

    /// Dot product
    /// a・b = Σ(a_i * b_i) over indices present in both
    pub fn dot(&self, other: &SparseVec<N>) -> f64 {
        let mut a_it = self.iter();
        let mut b_it = other.iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        let mut dot = 0_f64;
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    dot += to_f64(va) * to_f64(vb);
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        dot
    }

    /// Cosine similarity, computed in f64 from the stored values
    /// cosθ = a・b / √(|a|²|b|²), 0.0 when either side is the zero vector
    /// A vector compared with itself gives exactly 1.0, whatever `N` is.
    pub fn cosine_similarity(&self, other: &SparseVec<N>) -> f64 {
        let denom = (self.norm_sq() * other.norm_sq()).sqrt();
        if denom == 0.0 || !denom.is_finite() {
            return 0.0;
        }
        self.dot(other) / denom
    }
}

#[inline]
fn to_f64<N: Float>(val: N) -> f64 {
    <f64 as NumCast>::from(val).unwrap_or(0.0)
}

#[inline]
fn from_f64<N: Float>(val: f64) -> N {
    <N as NumCast>::from(val).unwrap_or_else(N::zero)
}
