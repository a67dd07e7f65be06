use std::path::PathBuf;

use crate::chart::ChartSpec;
use crate::regression::metrics::RegressionMetrics;
use crate::regression::trend::TrendLine;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// What the viewer window shows, independent of rendering.
pub struct ViewerState {
    /// Scatter points, axis ranges and trend segment.
    pub chart: ChartSpec,

    pub trend: TrendLine,

    /// Held-out metrics from the training run.
    pub metrics: RegressionMetrics,

    /// Where the file renderer wrote the chart.
    pub chart_path: PathBuf,

    /// Whether the trend line overlay is drawn.
    pub show_trend_line: bool,

    /// Whether the plot is clamped to the configured axis ranges.
    pub lock_axes: bool,
}

impl ViewerState {
    pub fn new(
        chart: ChartSpec,
        trend: TrendLine,
        metrics: RegressionMetrics,
        chart_path: PathBuf,
    ) -> Self {
        Self {
            chart,
            trend,
            metrics,
            chart_path,
            show_trend_line: true,
            lock_axes: true,
        }
    }

    /// Human-readable trend equation.
    pub fn trend_equation(&self) -> String {
        let sign = if self.trend.intercept < 0.0 { '-' } else { '+' };
        format!(
            "y = {:.4}·x {sign} {:.4}",
            self.trend.slope,
            self.trend.intercept.abs()
        )
    }

    /// Plotted points that fall outside the configured axis ranges.
    pub fn points_outside_axes(&self) -> usize {
        let (x0, x1) = self.chart.x_range;
        let (y0, y1) = self.chart.y_range;
        self.chart
            .points
            .iter()
            .filter(|&&(x, y)| !(x0..=x1).contains(&x) || !(y0..=y1).contains(&y))
            .count()
    }
}
