use serde::{Deserialize, Serialize};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Outlier filter: acceptable target range
// ---------------------------------------------------------------------------

/// Inclusive `[lower, upper]` range of acceptable `area` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaBounds {
    pub lower: f32,
    pub upper: f32,
}

impl Default for AreaBounds {
    fn default() -> Self {
        AreaBounds {
            lower: 1.0,
            upper: 150.0,
        }
    }
}

impl AreaBounds {
    pub fn contains(&self, area: f32) -> bool {
        self.lower <= area && area <= self.upper
    }
}

/// Keep the records whose `area` lies within `bounds`, in their original order.
///
/// An empty result is not an error here; training rejects it later.
pub fn filter_by_area(dataset: &Dataset, bounds: AreaBounds) -> Dataset {
    dataset
        .iter()
        .filter(|r| bounds.contains(r.area))
        .copied()
        .collect()
}
