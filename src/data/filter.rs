use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{GameRecord, GameTable, YearRange};

// ---------------------------------------------------------------------------
// FilterSelection – the user's current choice
// ---------------------------------------------------------------------------

/// Platforms, genres and release years the user wants to look at.
///
/// An empty platform or genre set means "no restriction", as does a
/// missing year range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub platforms: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    pub years: Option<YearRange>,
}

impl FilterSelection {
    /// The dashboard's starting point: every platform and genre, the full year span.
    pub fn everything(table: &GameTable) -> Self {
        FilterSelection {
            platforms: BTreeSet::new(),
            genres: BTreeSet::new(),
            years: table.year_bounds(),
        }
    }

    /// Whether a single row passes every active restriction.
    pub fn matches(&self, rec: &GameRecord) -> bool {
        (self.platforms.is_empty() || self.platforms.contains(&rec.platform))
            && (self.genres.is_empty() || self.genres.contains(&rec.genre))
            && self.years.map_or(true, |range| range.contains(rec.year))
    }
}

/// Return indices of rows that pass the selection.
///
/// Platform, genre and year restrictions narrow the same subset one after
/// another, so the year window only ever sees rows that already matched the
/// platform and genre choice.
pub fn filtered_indices(table: &GameTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
