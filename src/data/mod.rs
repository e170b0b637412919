/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///      games.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean rows → GameTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ GameTable  │  Vec<GameRecord>, platform / genre / year index
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → row indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  row indices → AggregationResult (scalars + chart tables)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
