use crate::error::{PipelineError, Result};

/// Straight reference line `y = slope·x + intercept` drawn over the
/// measured-vs-predicted scatter.
///
/// This is fit on the (actual, predicted) pairs of the plotted records and
/// has nothing to do with the trained model's own coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Closed-form least squares over `(x, y)` pairs:
    ///
    /// ```text
    /// slope     = (x̄·ȳ − mean(xy)) / (x̄² − mean(x²))
    /// intercept = ȳ − slope·x̄
    /// ```
    pub fn fit(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(PipelineError::InsufficientData {
                stage: "trend line",
                needed: 1,
                found: 0,
            });
        }

        let first_x = pairs[0].0;
        if pairs.iter().all(|&(x, _)| x == first_x) {
            return Err(PipelineError::DegenerateInput {
                stage: "trend line",
                message: format!("all {} actual values equal {first_x}", pairs.len()),
            });
        }

        let n = pairs.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for &(x, y) in pairs {
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }
        let mean_x = sum_x / n;
        let mean_y = sum_y / n;
        let mean_xy = sum_xy / n;
        let mean_xx = sum_xx / n;

        let denominator = mean_x * mean_x - mean_xx;
        if denominator == 0.0 {
            return Err(PipelineError::DegenerateInput {
                stage: "trend line",
                message: format!(
                    "actual values around {mean_x} are too close to separate in f64"
                ),
            });
        }

        let slope = (mean_x * mean_y - mean_xy) / denominator;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(PipelineError::DegenerateInput {
                stage: "trend line",
                message: format!("non-finite line (slope={slope}, intercept={intercept})"),
            });
        }
        Ok(TrendLine { slope, intercept })
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Two-point polyline spanning `[x_start, x_end]`.
    pub fn segment(&self, x_start: f64, x_end: f64) -> [(f64, f64); 2] {
        [(x_start, self.at(x_start)), (x_end, self.at(x_end))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_pairs() {
        let line = TrendLine::fit(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]).unwrap();
        assert!((line.slope - 1.0).abs() < 1e-12);
        assert!(line.intercept.abs() < 1e-12);
    }

    #[test]
    fn offset_line() {
        let pairs: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.5 * i as f64 + 4.0)).collect();
        let line = TrendLine::fit(&pairs).unwrap();
        assert!((line.slope - 0.5).abs() < 1e-12);
        assert!((line.intercept - 4.0).abs() < 1e-12);
    }

    #[test]
    fn identical_actual_values_are_degenerate() {
        let err = TrendLine::fit(&[(5.0, 1.0), (5.0, 9.0)]).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateInput { .. }));

        let err = TrendLine::fit(&[(0.1, 1.0), (0.1, 2.0), (0.1, 3.0)]).unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateInput { .. }));
    }

    #[test]
    fn tiny_distinct_actual_values_still_fit() {
        let line = TrendLine::fit(&[(1e-9, 1.0), (2e-9, 2.0), (3e-9, 3.0)]).unwrap();
        assert!((line.slope / 1e9 - 1.0).abs() < 1e-9, "slope = {}", line.slope);
        assert!(line.intercept.abs() < 1e-6, "intercept = {}", line.intercept);
    }

    #[test]
    fn single_pair_is_degenerate() {
        assert!(TrendLine::fit(&[(3.0, 4.0)]).is_err());
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert!(matches!(
            TrendLine::fit(&[]),
            Err(PipelineError::InsufficientData { .. })
        ));
    }

    #[test]
    fn segment_spans_requested_range() {
        let line = TrendLine {
            slope: 2.0,
            intercept: 1.0,
        };
        assert_eq!(line.segment(0.0, 35.0), [(0.0, 1.0), (35.0, 71.0)]);
    }
}
