/// Modeling layer: normalization, fitting, persistence, scoring.
///
/// ```text
///   filtered Dataset ──features::fit──▶ (NormalizationParams, FeatureVector*)
///                                              │
///                                        trainer::train
///                                              ▼
///                                        TrainedModel ──store::save/load──▶ artifact
///                                              │
///                    ┌─────────────────────────┼──────────────────────┐
///                    ▼                         ▼                      ▼
///          predict::PredictionEngine   metrics::evaluate    trend::TrendLine (plot only)
/// ```

pub mod features;
pub mod metrics;
pub mod model;
pub mod predict;
pub mod store;
pub mod trainer;
pub mod trend;
