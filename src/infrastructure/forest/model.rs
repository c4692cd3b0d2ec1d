//! Random forest classifier

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tree::DecisionTree;
use crate::domain::{Classifier, DomainError};

/// Ensemble of decision trees voting on a label.
///
/// `feature_names` records the column order the trees were trained on; callers
/// compare it against their own row layout before serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ForestArtifact", into = "ForestArtifact")]
pub struct RandomForest {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

#[derive(Serialize, Deserialize)]
struct ForestArtifact {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(feature_names: Vec<String>, trees: Vec<DecisionTree>) -> Result<Self, DomainError> {
        if feature_names.is_empty() {
            return Err(DomainError::artifact("forest declares no features"));
        }

        if trees.is_empty() {
            return Err(DomainError::artifact("forest has no trees"));
        }

        if let Some(feature) = trees.iter().filter_map(DecisionTree::max_feature).max() {
            if feature >= feature_names.len() {
                return Err(DomainError::artifact(format!(
                    "tree splits on feature {} but only {} features are declared",
                    feature,
                    feature_names.len()
                )));
            }
        }

        Ok(Self {
            feature_names,
            trees,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Fail unless the forest was trained on exactly `expected`, in that order
    pub fn ensure_feature_order(&self, expected: &[&str]) -> Result<(), DomainError> {
        let matches = self.feature_names.len() == expected.len()
            && self
                .feature_names
                .iter()
                .zip(expected)
                .all(|(actual, expected)| actual == expected);

        if matches {
            Ok(())
        } else {
            Err(DomainError::artifact(format!(
                "model was trained on features {:?} but inference assembles {:?}",
                self.feature_names, expected
            )))
        }
    }
}

impl Classifier for RandomForest {
    fn predict(&self, row: &[f64]) -> Result<i64, DomainError> {
        if row.len() != self.feature_names.len() {
            return Err(DomainError::classifier(format!(
                "expected {} features, got {}",
                self.feature_names.len(),
                row.len()
            )));
        }

        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();

        for tree in &self.trees {
            *votes.entry(tree.predict(row)?).or_default() += 1;
        }

        // Ascending iteration with a strict comparison resolves ties to the lowest label
        let mut winner: Option<(i64, usize)> = None;

        for (label, count) in votes {
            if winner.is_none_or(|(_, best)| count > best) {
                winner = Some((label, count));
            }
        }

        winner
            .map(|(label, _)| label)
            .ok_or_else(|| DomainError::classifier("forest produced no votes"))
    }

    fn feature_count(&self) -> usize {
        self.feature_names.len()
    }
}

impl TryFrom<ForestArtifact> for RandomForest {
    type Error = DomainError;

    fn try_from(artifact: ForestArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.feature_names, artifact.trees)
    }
}

impl From<RandomForest> for ForestArtifact {
    fn from(forest: RandomForest) -> Self {
        Self {
            feature_names: forest.feature_names,
            trees: forest.trees,
        }
    }
}
