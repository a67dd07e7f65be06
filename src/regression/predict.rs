use std::path::PathBuf;

use super::model::TrainedModel;
use crate::data::model::Record;
use crate::error::{PipelineError, Result};

/// Scores records against a loaded model.
///
/// Holds no per-call state, so every prediction depends only on its own record.
#[derive(Debug, Clone, Copy)]
pub struct PredictionEngine<'m> {
    model: &'m TrainedModel,
}

impl<'m> PredictionEngine<'m> {
    pub fn new(model: &'m TrainedModel) -> Self {
        PredictionEngine { model }
    }

    /// Predict the area of one record.
    ///
    /// The `area` field of the input is ignored; only the five features are
    /// read, and they must all be finite.
    pub fn predict_one(&self, record: &Record) -> Result<f32> {
        if let Some(field) = record.first_non_finite_feature() {
            return Err(PipelineError::Parse {
                path: PathBuf::from("<prediction input>"),
                line: 0,
                message: format!("{field} is not a finite number"),
            });
        }
        Ok(self.model.predict(record))
    }

    /// Predict every record in input order, stopping at the first failure.
    ///
    /// Accepts the fallible stream produced by
    /// [`DatasetReader::records`](crate::data::loader::DatasetReader::records)
    /// so read errors surface here unchanged.
    pub fn predict_batch<I>(&self, records: I) -> Result<Vec<f32>>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        records
            .into_iter()
            .map(|record| self.predict_one(&record?))
            .collect()
    }
}
