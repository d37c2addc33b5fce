use serde::Deserialize;

use crate::inference::{ArtifactError, Regressor};

/// Gradient-boosted regression trees: `init + learning_rate * Σ tree(x)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    pub init: f64,
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
}

/// A single regression tree, nodes stored flat with the root at index 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go left when `x[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl Tree {
    fn predict(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Children always point forward, so traversal terminates and stays in bounds.
    fn validate(&self, n_features: usize, tree_idx: usize) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::Contract(format!("tree {tree_idx} has no nodes")));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(ArtifactError::Contract(format!(
                        "tree {tree_idx} node {i} splits on feature {feature}, model has {n_features}"
                    )));
                }
                for child in [*left, *right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(ArtifactError::Contract(format!(
                            "tree {tree_idx} node {i} has invalid child {child}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, i)?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, x: &[f64]) -> f64 {
        let boost: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        self.init + self.learning_rate * boost
    }
}
