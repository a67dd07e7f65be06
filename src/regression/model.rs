use serde::{Deserialize, Serialize};

use super::features::{FeatureVector, NormalizationParams};
use crate::data::model::{Record, FEATURE_COUNT};

/// A fitted linear model: frozen normalization plus OLS coefficients.
///
/// Built only by [`train`](super::trainer::train) or by loading an artifact;
/// there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    normalization: NormalizationParams,
    weights: [f64; FEATURE_COUNT],
    bias: f64,
}

impl TrainedModel {
    pub(super) fn new(
        normalization: NormalizationParams,
        weights: [f64; FEATURE_COUNT],
        bias: f64,
    ) -> Self {
        TrainedModel {
            normalization,
            weights,
            bias,
        }
    }

    pub fn normalization(&self) -> &NormalizationParams {
        &self.normalization
    }

    /// Coefficients of the normalized features, in column order.
    pub fn weights(&self) -> &[f64; FEATURE_COUNT] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Score an already normalized feature vector.
    pub fn score(&self, vector: &FeatureVector) -> f32 {
        let dot: f64 = self
            .weights
            .iter()
            .zip(vector.features)
            .map(|(w, x)| w * f64::from(x))
            .sum();
        (self.bias + dot) as f32
    }

    /// Normalize `record` with the frozen parameters and score it.
    pub fn predict(&self, record: &Record) -> f32 {
        self.score(&self.normalization.apply(record))
    }

    /// Whether every coefficient is a finite number.
    pub fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weights.iter().all(|w| w.is_finite())
    }
}
