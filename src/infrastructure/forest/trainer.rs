//! CART training for bagged decision trees

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::model::RandomForest;
use super::tree::{DecisionTree, Node};
use crate::domain::DomainError;

/// Minimum impurity decrease for a split to be kept
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

/// Forest training parameters
#[derive(Debug, Clone)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth of each tree (root is depth 0)
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    /// Train each tree on a bootstrap resample instead of the full dataset
    pub bootstrap: bool,
    /// RNG seed; identical seeds produce identical forests
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 12,
            min_samples_split: 2,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Trains [`RandomForest`] models with Gini impurity splits
#[derive(Debug, Clone, Default)]
pub struct ForestTrainer {
    params: ForestParams,
}

impl ForestTrainer {
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Fit a forest on `rows` (each laid out in `feature_names` order) and `labels`
    pub fn fit<R: AsRef<[f64]>>(
        &self,
        feature_names: &[&str],
        rows: &[R],
        labels: &[i64],
    ) -> Result<RandomForest, DomainError> {
        self.check_inputs(feature_names, rows, labels)?;

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        let builder = TreeBuilder {
            rows,
            labels,
            feature_count: feature_names.len(),
            params: &self.params,
        };

        let trees = (0..self.params.n_trees)
            .map(|index| {
                let samples: Vec<usize> = if self.params.bootstrap {
                    (0..rows.len()).map(|_| rng.gen_range(0..rows.len())).collect()
                } else {
                    (0..rows.len()).collect()
                };

                let tree = builder.build(samples)?;
                debug!(tree = index, nodes = tree.node_count(), "Tree trained");
                Ok(tree)
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        info!(
            trees = self.params.n_trees,
            samples = rows.len(),
            features = feature_names.len(),
            "Random forest trained"
        );

        RandomForest::new(
            feature_names.iter().map(|name| name.to_string()).collect(),
            trees,
        )
    }

    fn check_inputs<R: AsRef<[f64]>>(
        &self,
        feature_names: &[&str],
        rows: &[R],
        labels: &[i64],
    ) -> Result<(), DomainError> {
        if self.params.n_trees == 0 {
            return Err(DomainError::configuration("n_trees must be greater than 0"));
        }

        if rows.is_empty() {
            return Err(DomainError::artifact("cannot train on an empty dataset"));
        }

        if rows.len() != labels.len() {
            return Err(DomainError::artifact(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != feature_names.len())
        {
            return Err(DomainError::artifact(format!(
                "row {} has {} values, expected {}",
                index,
                row.as_ref().len(),
                feature_names.len()
            )));
        }

        if rows.iter().flat_map(|row| row.as_ref()).any(|v| !v.is_finite()) {
            return Err(DomainError::artifact("training rows contain non-finite values"));
        }

        Ok(())
    }
}

struct TreeBuilder<'a, R> {
    rows: &'a [R],
    labels: &'a [i64],
    feature_count: usize,
    params: &'a ForestParams,
}

struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl<R: AsRef<[f64]>> TreeBuilder<'_, R> {
    fn build(&self, samples: Vec<usize>) -> Result<DecisionTree, DomainError> {
        let mut nodes = Vec::new();
        self.grow(samples, 0, &mut nodes);

        DecisionTree::new(nodes)
    }

    fn grow(&self, samples: Vec<usize>, depth: usize, nodes: &mut Vec<Node>) -> usize {
        let counts = self.class_counts(&samples);
        let index = nodes.len();
        nodes.push(Node::Leaf {
            label: majority(&counts),
        });

        if depth >= self.params.max_depth
            || samples.len() < self.params.min_samples_split
            || counts.len() <= 1
        {
            return index;
        }

        let Some(split) = self.best_split(&samples, gini(&counts, samples.len())) else {
            return index;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&sample| self.value(sample, split.feature) <= split.threshold);

        let left = self.grow(left, depth + 1, nodes);
        let right = self.grow(right, depth + 1, nodes);

        nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        index
    }

    /// Lowest weighted Gini split over every feature and threshold; ties keep
    /// the earliest feature
    fn best_split(&self, samples: &[usize], parent_impurity: f64) -> Option<Split> {
        let total = self.class_counts(samples);
        let n = samples.len() as f64;
        let mut best: Option<Split> = None;

        for feature in 0..self.feature_count {
            let mut sorted: Vec<(f64, i64)> = samples
                .iter()
                .map(|&sample| (self.value(sample, feature), self.labels[sample]))
                .collect();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left: BTreeMap<i64, usize> = BTreeMap::new();
            let mut right = total.clone();

            for i in 0..sorted.len() - 1 {
                let (value, label) = sorted[i];
                *left.entry(label).or_default() += 1;
                if let Some(count) = right.get_mut(&label) {
                    *count -= 1;
                }

                let next = sorted[i + 1].0;
                if value == next {
                    continue;
                }

                let n_left = i + 1;
                let n_right = sorted.len() - n_left;
                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / n;

                if impurity < parent_impurity - MIN_IMPURITY_DECREASE
                    && best.as_ref().is_none_or(|b| impurity < b.impurity)
                {
                    best = Some(Split {
                        feature,
                        threshold: value + (next - value) / 2.0,
                        impurity,
                    });
                }
            }
        }

        best
    }

    fn value(&self, sample: usize, feature: usize) -> f64 {
        self.rows[sample].as_ref()[feature]
    }

    fn class_counts(&self, samples: &[usize]) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for &sample in samples {
            *counts.entry(self.labels[sample]).or_default() += 1;
        }
        counts
    }
}

fn gini(counts: &BTreeMap<i64, usize>, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    1.0 - counts
        .values()
        .map(|&count| {
            let p = count as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Most frequent label; ties go to the lowest label
fn majority(counts: &BTreeMap<i64, usize>) -> i64 {
    let mut winner: Option<(i64, usize)> = None;

    for (&label, &count) in counts {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((label, count));
        }
    }

    winner.map(|(label, _)| label).unwrap_or(0)
}
