//! Binary decision tree

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A node in a flattened decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Route to `left` when `row[feature] <= threshold`, otherwise to `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: i64,
    },
}

/// Decision tree stored as a flat node list with the root at index 0.
///
/// Children always sit at a higher index than their parent, which rules out
/// cycles and bounds every traversal by the node count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeArtifact", into = "TreeArtifact")]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Serialize, Deserialize)]
struct TreeArtifact {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<Node>) -> Result<Self, DomainError> {
        if nodes.is_empty() {
            return Err(DomainError::artifact("decision tree has no nodes"));
        }

        for (index, node) in nodes.iter().enumerate() {
            if let Node::Split {
                left,
                right,
                threshold,
                ..
            } = node
            {
                let in_bounds = |child: usize| child > index && child < nodes.len();

                if !in_bounds(*left) || !in_bounds(*right) {
                    return Err(DomainError::artifact(format!(
                        "node {} has invalid children ({}, {})",
                        index, left, right
                    )));
                }

                if !threshold.is_finite() {
                    return Err(DomainError::artifact(format!(
                        "node {} has a non-finite threshold",
                        index
                    )));
                }
            }
        }

        Ok(Self { nodes })
    }

    /// A tree that always predicts `label`
    #[cfg(test)]
    pub fn constant(label: i64) -> Self {
        Self {
            nodes: vec![Node::Leaf { label }],
        }
    }

    pub fn predict(&self, row: &[f64]) -> Result<i64, DomainError> {
        let mut index = 0;

        loop {
            match &self.nodes[index] {
                Node::Leaf { label } => return Ok(*label),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).ok_or_else(|| {
                        DomainError::classifier(format!(
                            "split on feature {} but row has {} values",
                            feature,
                            row.len()
                        ))
                    })?;

                    index = if *value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Highest feature index referenced by any split
    pub fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Split { feature, .. } => Some(*feature),
                Node::Leaf { .. } => None,
            })
            .max()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl TryFrom<TreeArtifact> for DecisionTree {
    type Error = DomainError;

    fn try_from(artifact: TreeArtifact) -> Result<Self, Self::Error> {
        Self::new(artifact.nodes)
    }
}

impl From<DecisionTree> for TreeArtifact {
    fn from(tree: DecisionTree) -> Self {
        Self { nodes: tree.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// hour <= 5.5 -> fraud, else legitimate
    fn night_tree() -> DecisionTree {
        DecisionTree::new(vec![
            Node::Split {
                feature: 1,
                threshold: 5.5,
                left: 1,
                right: 2,
            },
            Node::Leaf { label: 1 },
            Node::Leaf { label: 0 },
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_follows_splits() {
        let tree = night_tree();
        assert_eq!(tree.predict(&[100.0, 2.0, 0.0]).unwrap(), 1);
        assert_eq!(tree.predict(&[100.0, 5.5, 0.0]).unwrap(), 1);
        assert_eq!(tree.predict(&[100.0, 14.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_predict_with_short_row_is_error() {
        let err = night_tree().predict(&[100.0]).unwrap_err();
        assert!(err.to_string().contains("row has 1 values"));
    }

    #[test]
    fn test_rejects_backward_children() {
        let nodes = vec![
            Node::Leaf { label: 0 },
            Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            },
        ];
        assert!(DecisionTree::new(nodes).is_err());
        assert!(DecisionTree::new(Vec::new()).is_err());
    }

    #[test]
    fn test_max_feature() {
        assert_eq!(night_tree().max_feature(), Some(1));
        assert_eq!(DecisionTree::constant(0).max_feature(), None);
    }

    #[test]
    fn test_serialization_validates_structure() {
        let json = serde_json::to_string(&night_tree()).unwrap();
        assert!(json.contains(r#""type":"split""#));

        let restored: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, night_tree());

        let cyclic = r#"{"nodes":[{"type":"split","feature":0,"threshold":1.0,"left":0,"right":0}]}"#;
        assert!(serde_json::from_str::<DecisionTree>(cyclic).is_err());
    }
}
