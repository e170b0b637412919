use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{aggregate, AggregationResult};
use crate::data::filter::FilterSelection;
use crate::data::model::{GameTable, YearRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned base table. Replaced wholesale on File → Open…, never mutated.
    pub table: Arc<GameTable>,

    /// File the table was loaded from.
    pub source: PathBuf,

    /// Current platform / genre / year choice.
    pub selection: FilterSelection,

    /// Figures for `selection` (cached, rebuilt by [`AppState::refilter`]).
    pub result: AggregationResult,

    /// Colour per platform for the games-by-year chart.
    pub platform_colors: ColorMap,

    /// Colour per genre for the score scatter.
    pub genre_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with a loaded table and an initial selection (from the command line).
    pub fn with_selection(table: GameTable, source: PathBuf, selection: FilterSelection) -> Self {
        let result = aggregate(&table, &selection);
        Self {
            platform_colors: ColorMap::new(table.platforms()),
            genre_colors: ColorMap::new(table.genres()),
            table: Arc::new(table),
            source,
            selection,
            result,
            status_message: None,
        }
    }

    /// Swap in a newly loaded table and reset the filters.
    pub fn set_table(&mut self, table: GameTable, source: PathBuf) {
        self.platform_colors = ColorMap::new(table.platforms());
        self.genre_colors = ColorMap::new(table.genres());
        self.selection = FilterSelection::everything(&table);
        self.table = Arc::new(table);
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `result` after a selection change.
    pub fn refilter(&mut self) {
        self.result = aggregate(&self.table, &self.selection);
        log::debug!(
            "Selection {:?} matched {} games",
            self.selection,
            self.result.total_games
        );
    }

    /// Number of rows behind the current figures.
    pub fn visible_rows(&self) -> usize {
        self.result.scores.len()
    }

    /// Toggle a single platform in the selection.
    pub fn toggle_platform(&mut self, platform: &str) {
        toggle(&mut self.selection.platforms, platform);
        self.refilter();
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        toggle(&mut self.selection.genres, genre);
        self.refilter();
    }

    /// Drop the platform restriction.
    pub fn clear_platforms(&mut self) {
        self.selection.platforms.clear();
        self.refilter();
    }

    /// Drop the genre restriction.
    pub fn clear_genres(&mut self) {
        self.selection.genres.clear();
        self.refilter();
    }

    /// Move the year window, clamped to the table's bounds.
    pub fn set_years(&mut self, from: i32, to: i32) {
        let range = match self.table.year_bounds() {
            Some(bounds) => YearRange::new(
                from.clamp(bounds.from(), bounds.to()),
                to.clamp(bounds.from(), bounds.to()),
            ),
            None => YearRange::new(from, to),
        };
        if self.selection.years != Some(range) {
            self.selection.years = Some(range);
            self.refilter();
        }
    }

    /// Back to every platform, every genre and the full year span.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::everything(&self.table);
        self.refilter();
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
