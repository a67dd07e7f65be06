use nalgebra::{DMatrix, DVector};

use super::features::{FeatureVector, NormalizationParams};
use super::model::TrainedModel;
use crate::data::model::FEATURE_COUNT;
use crate::error::{PipelineError, Result};

/// Singular values below this are treated as zero by the least-squares solve.
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Display name used when reporting metrics.
pub const TRAINER_NAME: &str = "OrdinaryLeastSquares";

/// Fit ordinary least squares with an intercept.
///
/// Solves `min ‖Xβ − y‖²` through an SVD of the design matrix `[1 | X]`, so
/// collinear or constant features yield the minimum-norm solution instead of
/// failing. The solve is deterministic for a given input order.
pub fn train(
    normalization: NormalizationParams,
    vectors: &[FeatureVector],
) -> Result<TrainedModel> {
    if vectors.len() < FEATURE_COUNT {
        return Err(PipelineError::InsufficientData {
            stage: "training",
            needed: FEATURE_COUNT,
            found: vectors.len(),
        });
    }

    let n = vectors.len();
    let design = DMatrix::from_fn(n, FEATURE_COUNT + 1, |row, col| match col {
        0 => 1.0,
        _ => f64::from(vectors[row].features[col - 1]),
    });
    let labels = DVector::from_iterator(n, vectors.iter().map(|v| f64::from(v.label)));

    let beta = design
        .svd(true, true)
        .solve(&labels, SINGULAR_TOLERANCE)
        .map_err(|e| PipelineError::DegenerateInput {
            stage: "training",
            message: e.to_string(),
        })?;

    let mut weights = [0f64; FEATURE_COUNT];
    for (w, b) in weights.iter_mut().zip(beta.iter().skip(1)) {
        *w = *b;
    }
    let model = TrainedModel::new(normalization, weights, beta[0]);

    if !model.is_finite() {
        return Err(PipelineError::DegenerateInput {
            stage: "training",
            message: "least-squares solution is not finite".into(),
        });
    }

    log::debug!(
        "fitted {} on {n} samples: bias={:.4}, weights={:?}",
        TRAINER_NAME,
        model.bias(),
        model.weights()
    );
    Ok(model)
}
