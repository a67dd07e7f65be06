/// Data layer: record schema, CSV loading, and outlier filtering.
///
/// Architecture:
/// ```text
///   train.csv / test.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Dataset (strict)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, file order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep lower ≤ area ≤ upper (training only)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
