//! Decision-tree ensemble model deserialized from a JSON export.
//!
//! The export format mirrors the flat node arrays of the training
//! environment's tree representation: `feature[i] < 0` marks node `i` as a
//! leaf, otherwise the sample routes left when
//! `x[feature[i]] <= threshold[i]`. The ensemble prediction is the mean of
//! the per-tree leaf values.

use serde::{Deserialize, Serialize};

use super::{InferenceError, Model};
use crate::types::ScaledFeatures;

/// One regression tree in flat-array form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub feature: Vec<i32>,
    pub threshold: Vec<f64>,
    pub children_left: Vec<u32>,
    pub children_right: Vec<u32>,
    pub value: Vec<f64>,
}

impl Tree {
    /// Walk the tree from the root to a leaf value.
    ///
    /// The node arrays come from an external file, so every index is
    /// bounds-checked and the walk is capped at the node count to reject
    /// a malformed cyclic export.
    fn evaluate(&self, x: &ScaledFeatures) -> Result<f64, InferenceError> {
        let node_count = self.feature.len();
        let mut node = 0usize;

        for _ in 0..=node_count {
            let feat = *self
                .feature
                .get(node)
                .ok_or_else(|| InferenceError::Internal(format!("node index {node} out of range")))?;

            if feat < 0 {
                return self
                    .value
                    .get(node)
                    .copied()
                    .ok_or_else(|| InferenceError::Internal(format!("leaf {node} has no value")));
            }

            let feat = feat as usize;
            let xi = *x.get(feat).ok_or_else(|| {
                InferenceError::Internal(format!("split references feature index {feat}"))
            })?;
            let threshold = *self.threshold.get(node).ok_or_else(|| {
                InferenceError::Internal(format!("node {node} has no threshold"))
            })?;

            let next = if xi <= threshold {
                self.children_left.get(node)
            } else {
                self.children_right.get(node)
            };
            node = *next.ok_or_else(|| {
                InferenceError::Internal(format!("node {node} has no children"))
            })? as usize;
        }

        Err(InferenceError::Internal(
            "tree walk exceeded node count (cyclic export)".to_string(),
        ))
    }
}

/// Averaging ensemble of regression trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleModel {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl Model for TreeEnsembleModel {
    fn predict(&self, features: &ScaledFeatures) -> Result<f64, InferenceError> {
        if self.trees.is_empty() {
            return Err(InferenceError::Internal("ensemble has no trees".to_string()));
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(features)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}
