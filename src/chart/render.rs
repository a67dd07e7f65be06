use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{ChartFormat, ChartSpec, VisualizationDriver};
use crate::error::{PipelineError, Result};

const CHART_SIZE: (u32, u32) = (1024, 768);

// ---------------------------------------------------------------------------
// File renderer backed by plotters
// ---------------------------------------------------------------------------

/// Writes the chart as PNG or SVG.
///
/// Drawing happens into a temporary file next to the target, which is only
/// renamed into place after the backend has flushed, so an aborted run
/// leaves no half-drawn chart.
#[derive(Debug, Clone, Copy)]
pub struct PlottersDriver {
    format: ChartFormat,
}

impl PlottersDriver {
    pub fn new(format: ChartFormat) -> Self {
        PlottersDriver { format }
    }
}

impl VisualizationDriver for PlottersDriver {
    fn render(&self, chart: &ChartSpec, out_stem: &Path) -> Result<PathBuf> {
        let target = out_stem.with_extension(self.format.extension());
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;

        // The bitmap backend picks its encoder from the extension.
        let tmp = tempfile::Builder::new()
            .prefix(".chart-")
            .suffix(&format!(".{}", self.format.extension()))
            .tempfile_in(&dir)
            .map_err(|e| PipelineError::io(&dir, e))?;

        match self.format {
            ChartFormat::Png => draw(
                BitMapBackend::new(tmp.path(), CHART_SIZE).into_drawing_area(),
                chart,
            )?,
            ChartFormat::Svg => draw(
                SVGBackend::new(tmp.path(), CHART_SIZE).into_drawing_area(),
                chart,
            )?,
        }

        tmp.persist(&target)
            .map_err(|e| PipelineError::io(&target, e.error))?;
        log::info!("chart written to {}", target.display());
        Ok(target)
    }
}

fn draw<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, chart: &ChartSpec) -> Result<()> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .draw()
        .map_err(render_err)?;

    // Points outside the axis range are left out rather than drawn over the labels.
    let inside = |&&(x, y): &&(f64, f64)| (x0..=x1).contains(&x) && (y0..=y1).contains(&y);
    ctx.draw_series(
        chart
            .points
            .iter()
            .filter(inside)
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )
    .map_err(render_err)?;

    ctx.draw_series(LineSeries::new(chart.line, RED.stroke_width(2)))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err<E: std::fmt::Display>(err: E) -> PipelineError {
    PipelineError::Render(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartSpec {
        ChartSpec {
            title: "test".into(),
            x_label: "Measured".into(),
            y_label: "Predicted".into(),
            x_range: (0.0, 35.0),
            y_range: (0.0, 35.0),
            points: vec![(1.0, 2.0), (10.0, 9.5), (30.0, 31.0), (80.0, 70.0)],
            line: [(0.0, 0.5), (35.0, 35.5)],
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn svg_is_written_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("charts/distribution");

        let path = PlottersDriver::new(ChartFormat::Svg)
            .render(&chart(), &stem)
            .unwrap();

        assert_eq!(path, stem.with_extension("svg"));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert_eq!(dir_entries(path.parent().unwrap()), vec!["distribution.svg"]);
    }

    #[test]
    fn png_is_written_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("distribution");

        let path = PlottersDriver::new(ChartFormat::Png)
            .render(&chart(), &stem)
            .unwrap();

        assert_eq!(path, stem.with_extension("png"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
        assert_eq!(dir_entries(dir.path()), vec!["distribution.png"]);
    }

    #[test]
    fn rerender_replaces_existing_chart() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("distribution");
        std::fs::write(stem.with_extension("svg"), b"stale").unwrap();

        let path = PlottersDriver::new(ChartFormat::Svg)
            .render(&chart(), &stem)
            .unwrap();

        assert_ne!(std::fs::read(&path).unwrap(), b"stale");
        assert_eq!(dir_entries(dir.path()), vec!["distribution.svg"]);
    }
}
