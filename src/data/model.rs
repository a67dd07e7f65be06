use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Input feature columns, in CSV order.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] =
    ["floor1", "floor2", "floor3", "floor4", "temperature"];

/// Number of input features per record.
pub const FEATURE_COUNT: usize = 5;

/// Raw name of the regression target in the CSV header.
pub const TARGET_COLUMN: &str = "area";

/// Canonical name of the target once it enters the feature pipeline.
pub const LABEL_COLUMN: &str = "Label";

// ---------------------------------------------------------------------------
// Record – one row of a dataset file
// ---------------------------------------------------------------------------

/// One sensor reading: four floor values, a temperature and the measured area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub floor1: f32,
    pub floor2: f32,
    pub floor3: f32,
    pub floor4: f32,
    pub temperature: f32,
    /// Regression target.
    pub area: f32,
}

impl Record {
    /// The five input features in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> [f32; FEATURE_COUNT] {
        [
            self.floor1,
            self.floor2,
            self.floor3,
            self.floor4,
            self.temperature,
        ]
    }

    /// Name of the first input feature holding NaN or an infinity, if any.
    pub fn first_non_finite_feature(&self) -> Option<&'static str> {
        self.features()
            .iter()
            .zip(FEATURE_COLUMNS)
            .find(|(v, _)| !v.is_finite())
            .map(|(_, name)| name)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the records of one file
// ---------------------------------------------------------------------------

/// Records in file order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(area: f32) -> Record {
        Record {
            floor1: 1.0,
            floor2: 2.0,
            floor3: 3.0,
            floor4: 4.0,
            temperature: 20.0,
            area,
        }
    }

    #[test]
    fn features_follow_column_order() {
        assert_eq!(record(7.0).features(), [1.0, 2.0, 3.0, 4.0, 20.0]);
    }

    #[test]
    fn first_non_finite_feature_names_the_field() {
        assert_eq!(record(1.0).first_non_finite_feature(), None);
        // The target is not an input feature.
        assert_eq!(record(f32::NAN).first_non_finite_feature(), None);

        let mut r = record(1.0);
        r.floor3 = f32::INFINITY;
        assert_eq!(r.first_non_finite_feature(), Some("floor3"));
    }
}
