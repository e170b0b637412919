use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Oldest release year kept by the loader.
pub const MIN_YEAR: i32 = 2000;
/// Newest release year kept by the loader.
pub const MAX_YEAR: i32 = 2022;

// ---------------------------------------------------------------------------
// YearRange – inclusive release year window
// ---------------------------------------------------------------------------

/// Inclusive `[from, to]` window of release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct YearRange {
    from: i32,
    to: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            from: a.min(b),
            to: a.max(b),
        }
    }

    /// Keep the bounds as given; `from > to` is an empty window.
    pub fn between(from: i32, to: i32) -> Self {
        YearRange { from, to }
    }

    pub fn from(&self) -> i32 {
        self.from
    }

    pub fn to(&self) -> i32 {
        self.to
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from <= year && year <= self.to
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.from, self.to)
    }
}

// ---------------------------------------------------------------------------
// GameRecord – one row of the base table
// ---------------------------------------------------------------------------

/// A single cleaned game row.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    pub genre: String,
    /// Release year, always within [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub year: i32,
    /// Finite critic score (0–100 in the usual dataset).
    pub critic_score: f64,
    /// Finite user score (0–10 in the usual dataset).
    pub user_score: f64,
    /// Age rating (ESRB code such as `E`, `T`, `M`).
    pub rating: String,
}

// ---------------------------------------------------------------------------
// GameTable – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The immutable base table with pre-computed value indices.
///
/// Built once by the loader; the engine only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTable {
    records: Vec<GameRecord>,
    /// Distinct platforms in order of first appearance.
    platforms: Vec<String>,
    /// Distinct genres in order of first appearance.
    genres: Vec<String>,
    /// Sorted distinct release years.
    years: Vec<i32>,
}

impl GameTable {
    /// Build the value indices from cleaned records.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut platforms = Vec::new();
        let mut genres = Vec::new();
        let mut seen_platforms = BTreeSet::new();
        let mut seen_genres = BTreeSet::new();
        let mut years = BTreeSet::new();

        for rec in &records {
            if seen_platforms.insert(rec.platform.as_str()) {
                platforms.push(rec.platform.clone());
            }
            if seen_genres.insert(rec.genre.as_str()) {
                genres.push(rec.genre.clone());
            }
            years.insert(rec.year);
        }

        GameTable {
            platforms,
            genres,
            years: years.into_iter().collect(),
            records,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Smallest window covering every row, `None` for an empty table.
    pub fn year_bounds(&self) -> Option<YearRange> {
        let first = *self.years.first()?;
        let last = *self.years.last()?;
        Some(YearRange::new(first, last))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
