/// Chart description and the drivers that render it.
///
/// The pipeline only builds a [`ChartSpec`]; turning it into pixels (and
/// choosing the file format) is the driver's concern.
pub mod render;

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Output file format of the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChartFormat {
    #[default]
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

/// Everything needed to draw the measured-vs-predicted chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// `(actual, predicted)` per plotted record.
    pub points: Vec<(f64, f64)>,
    /// Two-point trend line overlay.
    pub line: [(f64, f64); 2],
}

/// Renders a [`ChartSpec`] to a file.
pub trait VisualizationDriver {
    /// Draw `chart` to `<out_stem>.<ext>` and return the written path.
    fn render(&self, chart: &ChartSpec, out_stem: &Path) -> Result<PathBuf>;
}
