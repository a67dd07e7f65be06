use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::AreaBounds;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// File locations and tuning constants for one pipeline run.
///
/// Every field has a default; a JSON config file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub train_data_path: PathBuf,
    pub test_data_path: PathBuf,
    pub model_path: PathBuf,
    /// Training rows outside this range are dropped before fitting.
    pub area_bounds: AreaBounds,
    pub plot: PlotConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train_data_path: PathBuf::from("data/MOCK_DATA-train.csv"),
            test_data_path: PathBuf::from("data/MOCK_DATA-test.csv"),
            model_path: PathBuf::from("models/kinneret_area_model.json"),
            area_bounds: AreaBounds::default(),
            plot: PlotConfig::default(),
        }
    }
}

/// Measured-vs-predicted chart settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// How many test records are scored and drawn.
    pub max_records: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Output file name without extension.
    pub file_stem: PathBuf,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_records: 100,
            x_range: (0.0, 35.0),
            y_range: (0.0, 35.0),
            title: "Distribution of Area".to_string(),
            x_label: "Measured".to_string(),
            y_label: "Predicted".to_string(),
            file_stem: PathBuf::from("AreaCalcRegressionDistribution"),
        }
    }
}

impl PipelineConfig {
    /// Defaults, overridden by `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let b = self.area_bounds;
        anyhow::ensure!(
            b.lower <= b.upper,
            "area_bounds: lower {} is above upper {}",
            b.lower,
            b.upper
        );
        let (x0, x1) = self.plot.x_range;
        let (y0, y1) = self.plot.y_range;
        anyhow::ensure!(x0 < x1, "plot.x_range must be increasing, got ({x0}, {x1})");
        anyhow::ensure!(y0 < y1, "plot.y_range must be increasing, got ({y0}, {y1})");
        anyhow::ensure!(self.plot.max_records > 0, "plot.max_records must be positive");
        Ok(())
    }
}
