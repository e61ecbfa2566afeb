//! K-means partitioning of encoded user vectors.
//!
//! Lloyd's algorithm run from several random initializations; the restart
//! with the lowest inertia (within-cluster sum of squared distances) wins.
//! Fitting is the only way to obtain a [`PartitionModel`], and a fitted
//! model is immutable: it answers nearest-centroid queries any number of
//! times but never changes.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};
use crate::vector::Vector;

/// K-means configuration.
///
/// Defaults mirror the recommendation pipeline: 4 clusters, 10 random
/// restarts, seed 42.
#[derive(Debug, Clone)]
pub struct KMeans {
    n_clusters: usize,
    n_init: usize,
    max_iter: usize,
    tol: f32,
    seed: u64,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(4)
    }
}

impl KMeans {
    #[must_use]
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            seed: 42,
        }
    }

    /// Seed for centroid initialization. The same seed and data always
    /// produce the same partition.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of random restarts; at least one always runs.
    #[must_use]
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Partition `data` into `n_clusters` groups.
    ///
    /// Fails with a configuration error before touching any centroid when
    /// the cluster count is zero, exceeds the number of rows, or the rows
    /// disagree on width.
    pub fn fit(&self, data: &[Vector]) -> Result<PartitionModel> {
        if self.n_clusters == 0 {
            return Err(Error::InvalidConfig(
                "cluster count must be positive".to_string(),
            ));
        }
        if data.is_empty() {
            return Err(Error::InvalidConfig(
                "cannot partition an empty population".to_string(),
            ));
        }
        if self.n_clusters > data.len() {
            return Err(Error::InvalidConfig(format!(
                "cluster count {} exceeds population size {}",
                self.n_clusters,
                data.len()
            )));
        }
        let dim = data[0].dim();
        if let Some(bad) = data.iter().find(|v| v.dim() != dim) {
            return Err(Error::InvalidConfig(format!(
                "vector width mismatch: expected {dim}, got {}",
                bad.dim()
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut best = self.run_lloyd(data, &mut rng);
        for _ in 1..self.n_init {
            let candidate = self.run_lloyd(data, &mut rng);
            if candidate.inertia < best.inertia {
                best = candidate;
            }
        }
        Ok(best)
    }

    /// One Lloyd's run from a fresh random initialization.
    fn run_lloyd(&self, data: &[Vector], rng: &mut StdRng) -> PartitionModel {
        let dim = data[0].dim();

        // Distinct random rows as starting centroids.
        let mut centroids: Vec<Vector> = rand::seq::index::sample(rng, data.len(), self.n_clusters)
            .iter()
            .map(|i| data[i].clone())
            .collect();

        let mut labels = vec![0usize; data.len()];
        let mut n_iter = 0;
        for iter in 0..self.max_iter {
            n_iter = iter + 1;

            for (label, vector) in labels.iter_mut().zip(data) {
                *label = nearest(&centroids, vector).0;
            }

            let mut sums = vec![vec![0.0f32; dim]; self.n_clusters];
            let mut counts = vec![0usize; self.n_clusters];
            for (vector, &label) in data.iter().zip(labels.iter()) {
                counts[label] += 1;
                for (sum, x) in sums[label].iter_mut().zip(vector.as_slice()) {
                    *sum += x;
                }
            }

            let mut shift = 0.0f32;
            for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(counts.iter()) {
                // A cluster that lost all members keeps its centroid.
                if count == 0 {
                    continue;
                }
                let mean = Vector::new(sum.iter().map(|s| s / count as f32).collect());
                shift += centroid.l2_squared(&mean);
                *centroid = mean;
            }

            if shift <= self.tol {
                break;
            }
        }

        // Final assignment against the settled centroids.
        let mut inertia = 0.0f32;
        for (label, vector) in labels.iter_mut().zip(data) {
            let (best, dist) = nearest(&centroids, vector);
            *label = best;
            inertia += dist;
        }

        PartitionModel {
            centroids,
            labels,
            inertia,
            n_iter,
        }
    }
}

/// A fitted partition of the encoded population.
#[derive(Debug, Clone)]
pub struct PartitionModel {
    centroids: Vec<Vector>,
    labels: Vec<usize>,
    inertia: f32,
    n_iter: usize,
}

impl PartitionModel {
    /// Group label of the nearest centroid, always in `[0, n_clusters)`.
    #[must_use]
    pub fn predict(&self, vector: &Vector) -> usize {
        nearest(&self.centroids, vector).0
    }

    /// Labels of the training rows, in input order.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Within-cluster sum of squared distances for the training data.
    #[must_use]
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    #[must_use]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }
}

fn nearest(centroids: &[Vector], vector: &Vector) -> (usize, f32) {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = vector.l2_squared(centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    (best, best_dist)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<Vector> {
        vec![
            Vector::new(vec![0.0, 0.1]),
            Vector::new(vec![0.1, 0.0]),
            Vector::new(vec![0.2, 0.1]),
            Vector::new(vec![9.8, 10.0]),
            Vector::new(vec![10.0, 9.9]),
            Vector::new(vec![10.1, 10.1]),
        ]
    }

    #[test]
    fn test_fit_separates_blobs() {
        let model = KMeans::new(2).fit(&two_blobs()).unwrap();
        let labels = model.labels();

        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_labels_in_range() {
        let model = KMeans::new(3).fit(&two_blobs()).unwrap();
        assert!(model.labels().iter().all(|&l| l < 3));
        assert_eq!(model.n_clusters(), 3);
    }

    #[test]
    fn test_predict_matches_training_label() {
        let data = two_blobs();
        let model = KMeans::new(2).fit(&data).unwrap();
        for (vector, &label) in data.iter().zip(model.labels()) {
            assert_eq!(model.predict(vector), label);
        }
    }

    #[test]
    fn test_predict_new_point() {
        let model = KMeans::new(2).fit(&two_blobs()).unwrap();
        let near_origin = model.predict(&Vector::new(vec![0.05, 0.05]));
        let near_ten = model.predict(&Vector::new(vec![10.0, 10.0]));
        assert_ne!(near_origin, near_ten);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let data = two_blobs();
        let a = KMeans::new(2).with_seed(7).fit(&data).unwrap();
        let b = KMeans::new(2).with_seed(7).fit(&data).unwrap();
        assert_eq!(a.labels(), b.labels());
        assert_eq!(a.inertia(), b.inertia());
    }

    #[test]
    fn test_k_exceeds_population() {
        let data = vec![Vector::new(vec![0.0]), Vector::new(vec![1.0])];
        let err = KMeans::new(4).fit(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("exceeds population size"));
    }

    #[test]
    fn test_empty_population() {
        assert!(matches!(
            KMeans::new(4).fit(&[]),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_k_equals_population_is_exact() {
        let data = two_blobs();
        let model = KMeans::new(6).fit(&data).unwrap();
        assert!(model.inertia() < 1e-6);

        let mut sorted = model.labels().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let data = vec![Vector::new(vec![0.0, 0.0]), Vector::new(vec![1.0])];
        assert!(matches!(
            KMeans::new(1).fit(&data),
            Err(Error::InvalidConfig(_))
        ));
    }
}
