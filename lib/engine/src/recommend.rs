//! Request orchestration: the full fit-and-recommend pipeline.
//!
//! Every request refits the encoder and the partition model from a fresh
//! population snapshot; nothing survives the call. Stored user data is
//! never mutated.

use peermatch_core::{Error, KMeans, Result, UserProfile, UserRecord, Vector};
use rand::Rng;
use tracing::debug;

use crate::encoder::FeatureEncoder;
use crate::ranker::{Recommendation, SimilarityRanker, DEFAULT_POOL_SIZE};

/// Default number of population partitions.
pub const DEFAULT_CLUSTERS: usize = 4;

/// Default seed for the partition fit.
pub const DEFAULT_SEED: u64 = 42;

/// Pipeline configuration: cluster count, fit seed, restart count, and
/// the ranked pool size.
#[derive(Debug, Clone)]
pub struct Recommender {
    clusters: usize,
    seed: u64,
    restarts: usize,
    pool_size: usize,
}

impl Default for Recommender {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            seed: DEFAULT_SEED,
            restarts: 10,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl Recommender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clusters(mut self, clusters: usize) -> Self {
        self.clusters = clusters;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    #[must_use]
    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Run the full pipeline for one query user.
    ///
    /// Validates the query, fits the encoder and the partition model on
    /// the population, assigns the query to its cluster, and returns at
    /// most `limit` recommendations sampled from the cluster's top
    /// matches. Only the final sampling step consumes the RNG.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        population: &[UserRecord],
        query: &UserProfile,
        limit: usize,
        rng: &mut R,
    ) -> Result<Vec<Recommendation>> {
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let missing = query.missing_fields();
        if !missing.is_empty() {
            return Err(Error::InvalidQuery {
                fields: missing.iter().map(|f| (*f).to_string()).collect(),
            });
        }
        if self.clusters > population.len() {
            return Err(Error::InvalidConfig(format!(
                "cluster count {} exceeds population size {}",
                self.clusters,
                population.len()
            )));
        }

        let encoder = FeatureEncoder::fit(population)?;
        let encoded: Vec<Vector> = population
            .iter()
            .map(|record| encoder.encode(&record.profile))
            .collect();
        let query_vector = encoder.encode(query);
        debug!(
            width = encoder.width(),
            population = population.len(),
            "population encoded"
        );

        let model = KMeans::new(self.clusters)
            .with_seed(self.seed)
            .with_n_init(self.restarts)
            .fit(&encoded)?;
        let cluster = model.predict(&query_vector);
        debug!(cluster, inertia = model.inertia(), "query assigned");

        let members: Vec<(String, Vector)> = population
            .iter()
            .zip(encoded)
            .zip(model.labels())
            .filter(|&(_, &label)| label == cluster)
            .map(|((record, vector), _)| (record.id.clone(), vector))
            .collect();

        let ranker = SimilarityRanker::new(self.pool_size);
        Ok(ranker.rank(&query_vector, &members, limit, rng))
    }
}
