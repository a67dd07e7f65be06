use std::fmt;

use super::model::TrainedModel;
use super::predict::PredictionEngine;
use crate::data::model::Record;
use crate::error::{PipelineError, Result};

/// Quality of a model on a labeled set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub r_squared: f64,
    /// Mean absolute error (L1).
    pub mean_absolute_error: f64,
    /// Mean squared error (L2).
    pub mean_squared_error: f64,
    pub root_mean_squared_error: f64,
    pub sample_count: usize,
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  R2 Score:      {:.4}", self.r_squared)?;
        writeln!(f, "  Absolute loss: {:.4}", self.mean_absolute_error)?;
        writeln!(f, "  Squared loss:  {:.4}", self.mean_squared_error)?;
        writeln!(f, "  RMS loss:      {:.4}", self.root_mean_squared_error)?;
        write!(f, "  Samples:       {}", self.sample_count)
    }
}

/// Score `records` with `model` and compare against their `area` labels.
pub fn evaluate(model: &TrainedModel, records: &[Record]) -> Result<RegressionMetrics> {
    let engine = PredictionEngine::new(model);
    let predicted = engine.predict_batch(records.iter().copied().map(Ok))?;
    let predicted: Vec<f64> = predicted.into_iter().map(f64::from).collect();
    let actual: Vec<f64> = records.iter().map(|r| f64::from(r.area)).collect();
    regression_metrics(&predicted, &actual)
}

/// Compute metrics from paired predictions and labels.
///
/// `R² = 1 − SS_res / SS_tot`. When the labels have no variance, R² is 1 for
/// a perfect fit and 0 otherwise.
pub fn regression_metrics(predicted: &[f64], actual: &[f64]) -> Result<RegressionMetrics> {
    if actual.is_empty() {
        return Err(PipelineError::InsufficientData {
            stage: "evaluation",
            needed: 1,
            found: 0,
        });
    }
    if predicted.len() != actual.len() {
        return Err(PipelineError::DegenerateInput {
            stage: "evaluation",
            message: format!(
                "{} predictions for {} labels",
                predicted.len(),
                actual.len()
            ),
        });
    }

    let n = actual.len() as f64;
    let mean_actual = actual.iter().sum::<f64>() / n;

    let (mut ss_res, mut abs_sum, mut ss_tot) = (0.0, 0.0, 0.0);
    for (p, a) in predicted.iter().zip(actual) {
        let err = p - a;
        ss_res += err * err;
        abs_sum += err.abs();
        ss_tot += (a - mean_actual).powi(2);
    }

    let r_squared = if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else if ss_res == 0.0 {
        1.0
    } else {
        0.0
    };
    let mse = ss_res / n;

    Ok(RegressionMetrics {
        r_squared,
        mean_absolute_error: abs_sum / n,
        mean_squared_error: mse,
        root_mean_squared_error: mse.sqrt(),
        sample_count: actual.len(),
    })
}
