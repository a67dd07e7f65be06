use serde::{Deserialize, Serialize};

use crate::data::model::{Dataset, Record, FEATURE_COUNT};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Normalization parameters
// ---------------------------------------------------------------------------

/// Min-max statistics of one input column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    /// Scale `value` into `[0, 1]` relative to the training range.
    ///
    /// Values outside the training range land outside `[0, 1]`. A column
    /// that was constant during training maps everything to 0.
    pub fn scale(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range > 0.0 {
            (value - self.min) / range
        } else {
            0.0
        }
    }
}

/// Frozen per-feature scaling, fit once on the training set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationParams {
    columns: [MinMax; FEATURE_COUNT],
}

impl NormalizationParams {
    pub fn columns(&self) -> &[MinMax; FEATURE_COUNT] {
        &self.columns
    }

    /// Normalize one record with these parameters. Never refits.
    pub fn apply(&self, record: &Record) -> FeatureVector {
        let raw = record.features();
        let mut features = [0f32; FEATURE_COUNT];
        for ((out, value), stats) in features.iter_mut().zip(raw).zip(&self.columns) {
            *out = stats.scale(value);
        }
        FeatureVector {
            features,
            label: record.area,
        }
    }
}

// ---------------------------------------------------------------------------
// Feature vector
// ---------------------------------------------------------------------------

/// The normalized inputs of a record concatenated, plus its `Label`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub features: [f32; FEATURE_COUNT],
    pub label: f32,
}

/// Fit normalization on `dataset` and transform every record with it.
pub fn fit(dataset: &Dataset) -> Result<(NormalizationParams, Vec<FeatureVector>)> {
    let mut records = dataset.iter();
    let first = records.next().ok_or(PipelineError::InsufficientData {
        stage: "feature normalization",
        needed: 1,
        found: 0,
    })?;

    let mut columns = first.features().map(|v| MinMax { min: v, max: v });
    for record in records {
        for (stats, value) in columns.iter_mut().zip(record.features()) {
            stats.min = stats.min.min(value);
            stats.max = stats.max.max(value);
        }
    }

    let params = NormalizationParams { columns };
    let vectors = dataset.iter().map(|r| params.apply(r)).collect();
    Ok((params, vectors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(f: [f32; 5], area: f32) -> Record {
        Record {
            floor1: f[0],
            floor2: f[1],
            floor3: f[2],
            floor4: f[3],
            temperature: f[4],
            area,
        }
    }

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            rec([10.0, 0.0, 5.0, 1.0, 20.0], 3.0),
            rec([20.0, 50.0, 5.0, 2.0, 30.0], 6.0),
            rec([30.0, 100.0, 5.0, 4.0, 25.0], 9.0),
        ])
    }

    #[test]
    fn fit_scales_each_column_independently() {
        let (params, vectors) = fit(&sample()).unwrap();

        assert_eq!(params.columns()[0], MinMax { min: 10.0, max: 30.0 });
        assert_eq!(params.columns()[1], MinMax { min: 0.0, max: 100.0 });
        assert_eq!(vectors[1].features, [0.5, 0.5, 0.0, 1.0 / 3.0, 1.0]);
        assert_eq!(vectors[2].features[0], 1.0);
    }

    #[test]
    fn label_carries_the_area() {
        let (_, vectors) = fit(&sample()).unwrap();
        let labels: Vec<f32> = vectors.iter().map(|v| v.label).collect();
        assert_eq!(labels, vec![3.0, 6.0, 9.0]);
    }

    #[test]
    fn apply_reproduces_fit_time_vectors() {
        let ds = sample();
        let (params, vectors) = fit(&ds).unwrap();
        for (record, expected) in ds.iter().zip(&vectors) {
            assert_eq!(params.apply(record), *expected);
        }
    }

    #[test]
    fn apply_does_not_refit_on_new_data() {
        let (params, _) = fit(&sample()).unwrap();
        let unseen = rec([40.0, 200.0, 5.0, 1.0, 20.0], 0.0);
        let v = params.apply(&unseen);
        assert_eq!(v.features[0], 1.5);
        assert_eq!(v.features[1], 2.0);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let (_, vectors) = fit(&sample()).unwrap();
        assert!(vectors.iter().all(|v| v.features[2] == 0.0));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = fit(&Dataset::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData { found: 0, .. }));
    }
}
