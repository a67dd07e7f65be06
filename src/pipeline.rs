use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::chart::{ChartSpec, VisualizationDriver};
use crate::config::PipelineConfig;
use crate::data::filter::filter_by_area;
use crate::data::loader::DatasetReader;
use crate::data::model::{Record, LABEL_COLUMN, TARGET_COLUMN};
use crate::regression::metrics::{self, RegressionMetrics};
use crate::regression::model::TrainedModel;
use crate::regression::predict::PredictionEngine;
use crate::regression::trend::TrendLine;
use crate::regression::{features, store, trainer};

/// Reference reading scored after training.
pub const SAMPLE_RECORD: Record = Record {
    floor1: 123.0,
    floor2: 212.0,
    floor3: 232.0,
    floor4: 12.0,
    temperature: 23.0,
    area: 0.0,
};

/// Measured area of [`SAMPLE_RECORD`], printed next to its prediction.
pub const SAMPLE_ACTUAL_AREA: f32 = 12.0;

// ---------------------------------------------------------------------------
// Train → evaluate → save
// ---------------------------------------------------------------------------

/// Fit on the filtered training file, score the full test file, save the model.
pub fn train_evaluate_and_save(
    config: &PipelineConfig,
) -> Result<(TrainedModel, RegressionMetrics)> {
    let train_path = &config.train_data_path;
    let raw = DatasetReader::new(train_path)
        .read()
        .with_context(|| format!("loading training data {}", train_path.display()))?;
    let test = DatasetReader::new(&config.test_data_path)
        .read()
        .with_context(|| format!("loading test data {}", config.test_data_path.display()))?;

    let bounds = config.area_bounds;
    let training = filter_by_area(&raw, bounds);
    log::info!(
        "training rows: {} read, {} kept with {TARGET_COLUMN} in [{}, {}]",
        raw.len(),
        training.len(),
        bounds.lower,
        bounds.upper
    );

    let (params, vectors) = features::fit(&training).context("normalizing training features")?;
    let model = trainer::train(params, &vectors).context("training regression model")?;
    log::debug!(
        "{TARGET_COLUMN} copied to {LABEL_COLUMN}; frozen min/max per feature: {:?}",
        model.normalization().columns()
    );

    // Evaluation uses the unfiltered test set.
    let metrics =
        metrics::evaluate(&model, test.records()).context("evaluating model on test data")?;
    log::info!(
        "*** Metrics for {} regression model ***\n{metrics}",
        trainer::TRAINER_NAME
    );

    store::save(&model, &config.model_path)
        .with_context(|| format!("saving model to {}", config.model_path.display()))?;
    log::info!("the model is saved to {}", config.model_path.display());

    Ok((model, metrics))
}

// ---------------------------------------------------------------------------
// Single prediction
// ---------------------------------------------------------------------------

/// Reload the saved model and score [`SAMPLE_RECORD`].
pub fn predict_sample(config: &PipelineConfig) -> Result<f32> {
    let model = load_model(config)?;
    let predicted = PredictionEngine::new(&model)
        .predict_one(&SAMPLE_RECORD)
        .context("scoring sample record")?;
    log::info!("predicted area: {predicted:.4}, actual area: {SAMPLE_ACTUAL_AREA}");
    Ok(predicted)
}

fn load_model(config: &PipelineConfig) -> Result<TrainedModel> {
    store::load(&config.model_path)
        .with_context(|| format!("loading model from {}", config.model_path.display()))
}

// ---------------------------------------------------------------------------
// Measured-vs-predicted chart
// ---------------------------------------------------------------------------

/// A rendered chart and the data it was drawn from.
#[derive(Debug, Clone)]
pub struct PlotOutcome {
    pub chart: ChartSpec,
    pub trend: TrendLine,
    pub path: PathBuf,
}

/// Score the first `plot.max_records` test rows and build the chart.
pub fn build_chart(
    model: &TrainedModel,
    config: &PipelineConfig,
) -> Result<(ChartSpec, TrendLine)> {
    let plot = &config.plot;
    let reader = DatasetReader::new(&config.test_data_path).with_max_records(plot.max_records);
    let records = reader
        .read()
        .with_context(|| format!("loading plot data {}", reader.path().display()))?;

    let predicted = PredictionEngine::new(model)
        .predict_batch(records.iter().copied().map(Ok))
        .context("scoring plot records")?;

    let points: Vec<(f64, f64)> = records
        .iter()
        .zip(&predicted)
        .map(|(record, &p)| {
            log::debug!("predicted: {p:.4}  actual: {:.4}", record.area);
            (f64::from(record.area), f64::from(p))
        })
        .collect();

    let trend = TrendLine::fit(&points).context("fitting chart trend line")?;
    let chart = ChartSpec {
        title: plot.title.clone(),
        x_label: plot.x_label.clone(),
        y_label: plot.y_label.clone(),
        x_range: plot.x_range,
        y_range: plot.y_range,
        points,
        line: trend.segment(plot.x_range.0, plot.x_range.1),
    };
    Ok((chart, trend))
}

/// Reload the model, build the chart and hand it to `driver`.
pub fn plot_regression_chart(
    config: &PipelineConfig,
    driver: &dyn VisualizationDriver,
) -> Result<PlotOutcome> {
    let model = load_model(config)?;
    let (chart, trend) = build_chart(&model, config)?;
    log::info!(
        "trend line over {} points: slope={:.4}, intercept={:.4}",
        chart.points.len(),
        trend.slope,
        trend.intercept
    );

    let path = driver
        .render(&chart, &config.plot.file_stem)
        .context("rendering chart")?;
    Ok(PlotOutcome { chart, trend, path })
}
