//! Random forest classifier: JSON-serializable trees, majority vote, CART training

mod model;
mod trainer;
mod tree;

pub use model::RandomForest;
pub use trainer::{ForestParams, ForestTrainer};
pub use tree::{DecisionTree, Node};
