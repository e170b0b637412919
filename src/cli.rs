use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FilterSelection;
use crate::data::model::{GameTable, YearRange, MAX_YEAR, MIN_YEAR};

/// Games market dashboard.
///
/// Opens the dashboard window by default; `--summary` prints the figures for
/// the given filters as JSON instead.
#[derive(Debug, Parser)]
#[command(name = "games-dash", version, about)]
pub struct Args {
    /// CSV file with the games dataset.
    #[arg(short, long, env = "GAMES_DASH_DATA", default_value = "games.csv")]
    pub data: PathBuf,

    /// Print the aggregation as JSON and exit instead of opening a window.
    #[arg(long)]
    pub summary: bool,

    /// Only include this platform (repeatable).
    #[arg(long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<String>,

    /// Only include this genre (repeatable).
    #[arg(long = "genre", value_name = "GENRE")]
    pub genres: Vec<String>,

    /// First release year to include.
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last release year to include.
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,
}

impl Args {
    /// Selection described by the filter flags.
    ///
    /// A missing year bound falls back to the loader's window, and the bounds
    /// are taken as given: `--from` past every loaded year selects nothing.
    pub fn selection(&self, table: &GameTable) -> FilterSelection {
        let mut selection = FilterSelection::everything(table);
        selection.platforms = self.platforms.iter().cloned().collect();
        selection.genres = self.genres.iter().cloned().collect();

        if self.from.is_some() || self.to.is_some() {
            selection.years = Some(YearRange::between(
                self.from.unwrap_or(MIN_YEAR),
                self.to.unwrap_or(MAX_YEAR),
            ));
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::model::tests::record;

    fn table() -> GameTable {
        GameTable::from_records(vec![
            record("A", "PS4", "Action", 2010, 80.0, 7.5, "M"),
            record("B", "PC", "RPG", 2015, 90.0, 8.0, "T"),
        ])
    }

    #[test]
    fn defaults_select_everything() {
        let args = Args::try_parse_from(["games-dash"]).unwrap();
        assert_eq!(args.data, PathBuf::from("games.csv"));
        assert!(!args.summary);

        let table = table();
        assert_eq!(args.selection(&table), FilterSelection::everything(&table));
    }

    #[test]
    fn repeated_flags_build_sets() {
        let args = Args::try_parse_from([
            "games-dash",
            "--summary",
            "--platform",
            "PS4",
            "--platform",
            "PC",
            "--genre",
            "RPG",
            "--data",
            "other.csv",
        ])
        .unwrap();

        let selection = args.selection(&table());
        assert!(args.summary);
        assert_eq!(args.data, PathBuf::from("other.csv"));
        assert_eq!(selection.platforms.len(), 2);
        assert!(selection.genres.contains("RPG"));
    }

    #[test]
    fn half_open_year_flags_use_loader_window() {
        let args = Args::try_parse_from(["games-dash", "--from", "2012"]).unwrap();
        assert_eq!(
            args.selection(&table()).years,
            Some(YearRange::between(2012, MAX_YEAR))
        );

        let args = Args::try_parse_from(["games-dash", "--to", "2012"]).unwrap();
        assert_eq!(
            args.selection(&table()).years,
            Some(YearRange::between(MIN_YEAR, 2012))
        );
    }

    #[test]
    fn from_after_last_loaded_year_selects_nothing() {
        let table = table();
        let args = Args::try_parse_from(["games-dash", "--from", "2020"]).unwrap();
        let selection = args.selection(&table);

        assert_eq!(selection.years, Some(YearRange::between(2020, MAX_YEAR)));
        let result = aggregate(&table, &selection);
        assert_eq!(result.total_games, 0);
        assert_eq!(result.mean_user_score, None);
    }

    #[test]
    fn reversed_year_flags_select_nothing() {
        let table = table();
        let args =
            Args::try_parse_from(["games-dash", "--from", "2015", "--to", "2010"]).unwrap();
        let selection = args.selection(&table);

        assert_eq!(selection.years, Some(YearRange::between(2015, 2010)));
        assert_eq!(aggregate(&table, &selection).total_games, 0);
    }

    #[test]
    fn year_flags_on_empty_table() {
        let empty = GameTable::from_records(Vec::new());
        let args = Args::try_parse_from(["games-dash", "--to", "2004"]).unwrap();
        assert_eq!(
            args.selection(&empty).years,
            Some(YearRange::between(MIN_YEAR, 2004))
        );
    }
}
