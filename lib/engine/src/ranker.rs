//! Similarity ranking with bounded random sampling.
//!
//! Scores every candidate against the query by cosine similarity, keeps
//! a deterministic top pool, then returns a random sample from that pool
//! so repeated requests see some variety among clearly similar peers
//! instead of always the literal best set.

use peermatch_core::Vector;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default size of the deterministic pool the final sample is drawn from.
pub const DEFAULT_POOL_SIZE: usize = 20;

/// A recommended peer with its similarity score in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub similarity: f64,
}

/// Ranks in-cluster candidates against the query vector.
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    pool_size: usize,
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

impl SimilarityRanker {
    #[must_use]
    pub fn new(pool_size: usize) -> Self {
        Self { pool_size }
    }

    /// Score and sort all candidates, keeping at most the pool size.
    ///
    /// Deterministic for fixed inputs: scores are scaled to `[0, 100]`,
    /// rounded to 2 decimals, and sorted descending with a stable sort,
    /// so equal scores keep candidate order.
    #[must_use]
    pub fn top_matches(
        &self,
        query: &Vector,
        candidates: &[(String, Vector)],
    ) -> Vec<Recommendation> {
        let mut scored: Vec<Recommendation> = candidates
            .iter()
            .map(|(id, vector)| Recommendation {
                id: id.clone(),
                similarity: round2(f64::from(query.cosine_similarity(vector)) * 100.0),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(self.pool_size);
        scored
    }

    /// Rank candidates and return `min(limit, pool)` of the top pool,
    /// sampled without replacement and ordered by descending score.
    ///
    /// An empty candidate set or a zero limit yields an empty list, not
    /// an error. Only this sampling step consumes the RNG; the pool
    /// itself is deterministic.
    pub fn rank<R: Rng + ?Sized>(
        &self,
        query: &Vector,
        candidates: &[(String, Vector)],
        limit: usize,
        rng: &mut R,
    ) -> Vec<Recommendation> {
        let pool = self.top_matches(query, candidates);
        let take = limit.min(pool.len());
        if take == 0 {
            return Vec::new();
        }

        let mut sampled: Vec<Recommendation> = rand::seq::index::sample(rng, pool.len(), take)
            .iter()
            .map(|i| pool[i].clone())
            .collect();
        sampled.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sampled
    }
}

/// Round to 2 decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
