//! Statistical models backing the analysis pipeline.
//!
//! Both models are seeded and deterministic: tree and centroid RNGs are
//! derived per worker from the base seed, so rayon scheduling never
//! changes the output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

use crate::analysis::features::{FeatureMatrix, FEATURE_DIMS};

/// Euler-Mascheroni constant, used in the average BST path length.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
/// Odd 64-bit constant for deriving per-worker seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Trees per isolation forest.
const TREE_COUNT: usize = 100;
/// Sub-sample size per tree, capped at the sample count.
const SUB_SAMPLE: usize = 256;
/// Fraction of the sample reported as outliers.
const CONTAMINATION: f64 = 0.05;
/// Minimum samples before outlier detection is meaningful.
const MIN_OUTLIER_SAMPLES: usize = 10;
/// Lloyd iteration cap for k-means.
const MAX_KMEANS_ITERATIONS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("need at least {minimum} samples, got {actual}")]
    TooFewSamples { minimum: usize, actual: usize },
    #[error("cannot form {k} clusters from {samples} samples")]
    BadClusterCount { k: usize, samples: usize },
}

/// Flags the most isolated rows of a feature matrix.
pub trait OutlierModel {
    /// Returns flagged row indices in ascending order.
    fn flag_outliers(&self, features: &FeatureMatrix) -> Result<Vec<usize>, ModelError>;
}

/// Partitions rows of a feature matrix into groups.
pub trait ClusterModel {
    /// Returns one group id per row.
    fn assign_clusters(&self, features: &FeatureMatrix) -> Result<Vec<usize>, ModelError>;
}

// ============================================================================
// Isolation forest
// ============================================================================

enum IsoNode {
    Split { dim: usize, threshold: f64, left: Box<IsoNode>, right: Box<IsoNode> },
    Leaf { size: usize },
}

/// Average unsuccessful-search path length of a BST with `n` nodes.
fn average_path_length(n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let n = n as f64;
    2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
}

/// Seeded isolation forest over the standard feature layout.
#[derive(Debug, Clone, Copy)]
pub struct IsolationForest {
    seed: u64,
}

impl IsolationForest {
    pub fn new(seed: u64) -> Self {
        IsolationForest { seed }
    }

    fn build_tree(
        rows: &[[f64; FEATURE_DIMS]],
        indices: Vec<usize>,
        depth: usize,
        max_depth: usize,
        rng: &mut StdRng,
    ) -> IsoNode {
        if depth >= max_depth || indices.len() <= 1 {
            return IsoNode::Leaf { size: indices.len() };
        }

        // Only dimensions with actual spread can be split on.
        let mut candidates = Vec::with_capacity(FEATURE_DIMS);
        for dim in 0..FEATURE_DIMS {
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &i in &indices {
                lo = lo.min(rows[i][dim]);
                hi = hi.max(rows[i][dim]);
            }
            if lo < hi {
                candidates.push((dim, lo, hi));
            }
        }
        if candidates.is_empty() {
            return IsoNode::Leaf { size: indices.len() };
        }

        let (dim, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
        let threshold = rng.gen_range(lo..hi);

        let (left, right): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&i| rows[i][dim] < threshold);

        IsoNode::Split {
            dim,
            threshold,
            left: Box::new(Self::build_tree(rows, left, depth + 1, max_depth, rng)),
            right: Box::new(Self::build_tree(rows, right, depth + 1, max_depth, rng)),
        }
    }

    fn path_length(row: &[f64; FEATURE_DIMS], mut node: &IsoNode) -> f64 {
        let mut depth = 0.0;
        loop {
            match node {
                IsoNode::Leaf { size } => return depth + average_path_length(*size),
                IsoNode::Split { dim, threshold, left, right } => {
                    node = if row[*dim] < *threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

impl OutlierModel for IsolationForest {
    fn flag_outliers(&self, features: &FeatureMatrix) -> Result<Vec<usize>, ModelError> {
        let n = features.len();
        if n < MIN_OUTLIER_SAMPLES {
            return Err(ModelError::TooFewSamples { minimum: MIN_OUTLIER_SAMPLES, actual: n });
        }

        let rows = features.rows();
        let sample_size = SUB_SAMPLE.min(n);
        let max_depth = (sample_size as f64).log2().ceil() as usize;

        let trees: Vec<IsoNode> = (0..TREE_COUNT)
            .into_par_iter()
            .map(|t| {
                let mut rng =
                    StdRng::seed_from_u64(self.seed.wrapping_add((t as u64).wrapping_mul(SEED_STRIDE)));
                let sample = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
                Self::build_tree(rows, sample, 0, max_depth, &mut rng)
            })
            .collect();

        let normalizer = average_path_length(sample_size);
        let scores: Vec<f64> = rows
            .par_iter()
            .map(|row| {
                let mean_path: f64 = trees.iter().map(|t| Self::path_length(row, t)).sum::<f64>()
                    / TREE_COUNT as f64;
                2f64.powf(-mean_path / normalizer)
            })
            .collect();

        let n_outliers = ((n as f64 * CONTAMINATION).floor() as usize).max(1);
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        let mut flagged: Vec<usize> = ranked.into_iter().take(n_outliers).collect();
        flagged.sort_unstable();
        Ok(flagged)
    }
}

// ============================================================================
// K-means
// ============================================================================

fn distance_sq(a: &[f64; FEATURE_DIMS], b: &[f64; FEATURE_DIMS]) -> f64 {
    let mut acc = 0.0;
    for dim in 0..FEATURE_DIMS {
        let d = a[dim] - b[dim];
        acc += d * d;
    }
    acc
}

/// Seeded k-means with k-means++ initialization.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    k: usize,
    seed: u64,
}

impl KMeans {
    pub fn new(k: usize, seed: u64) -> Self {
        KMeans { k, seed }
    }

    /// Cluster count heuristic: a target of one cluster per ten records,
    /// capped at five, with a floor of two for small samples.
    pub fn suggested_k(samples: usize) -> usize {
        if samples > 10 {
            5.min(samples / 10)
        } else {
            2
        }
    }

    fn init_centroids(
        &self,
        rows: &[[f64; FEATURE_DIMS]],
        rng: &mut StdRng,
    ) -> Vec<[f64; FEATURE_DIMS]> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(rows[rng.gen_range(0..rows.len())]);

        while centroids.len() < self.k {
            let weights: Vec<f64> = rows
                .iter()
                .map(|row| {
                    centroids
                        .iter()
                        .map(|c| distance_sq(row, c))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();
            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                // Every remaining point coincides with a centroid.
                centroids.push(rows[rng.gen_range(0..rows.len())]);
                continue;
            }
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = rows.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                target -= w;
                if target <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            centroids.push(rows[chosen]);
        }
        centroids
    }

    fn nearest(centroids: &[[f64; FEATURE_DIMS]], row: &[f64; FEATURE_DIMS]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in centroids.iter().enumerate() {
            let d = distance_sq(row, c);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }
}

impl ClusterModel for KMeans {
    fn assign_clusters(&self, features: &FeatureMatrix) -> Result<Vec<usize>, ModelError> {
        let rows = features.rows();
        let n = rows.len();
        if self.k == 0 || n < self.k {
            return Err(ModelError::BadClusterCount { k: self.k, samples: n });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.init_centroids(rows, &mut rng);
        let mut assignments: Vec<usize> =
            rows.par_iter().map(|row| Self::nearest(&centroids, row)).collect();

        for _ in 0..MAX_KMEANS_ITERATIONS {
            // Recompute centroids from current assignments.
            let mut sums = vec![[0.0; FEATURE_DIMS]; self.k];
            let mut counts = vec![0usize; self.k];
            for (row, &cluster) in rows.iter().zip(&assignments) {
                for dim in 0..FEATURE_DIMS {
                    sums[cluster][dim] += row[dim];
                }
                counts[cluster] += 1;
            }
            for (cluster, count) in counts.iter().enumerate() {
                if *count == 0 {
                    // Reseed an empty cluster at the point farthest from
                    // its present centroid.
                    let farthest = (0..n)
                        .max_by(|&a, &b| {
                            let da = distance_sq(&rows[a], &centroids[assignments[a]]);
                            let db = distance_sq(&rows[b], &centroids[assignments[b]]);
                            da.total_cmp(&db)
                        })
                        .unwrap_or(0);
                    centroids[cluster] = rows[farthest];
                } else {
                    for dim in 0..FEATURE_DIMS {
                        centroids[cluster][dim] = sums[cluster][dim] / *count as f64;
                    }
                }
            }

            let next: Vec<usize> =
                rows.par_iter().map(|row| Self::nearest(&centroids, row)).collect();
            if next == assignments {
                break;
            }
            assignments = next;
        }

        Ok(assignments)
    }
}
