use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::filter::{filtered_indices, FilterSelection};
use super::model::{GameRecord, GameTable};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Number of games released on one platform in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformYearCount {
    pub platform: String,
    pub year: i32,
    pub count: usize,
}

/// One row projected for the user vs critic score scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub user_score: f64,
    pub critic_score: f64,
    pub genre: String,
}

/// Most frequent age rating within one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreRating {
    pub genre: String,
    /// Every rating sharing the highest count, sorted. Never empty.
    pub ratings: Vec<String>,
}

impl GenreRating {
    /// The rating shown when a single value is needed.
    pub fn primary(&self) -> &str {
        self.ratings.first().map(String::as_str).unwrap_or_default()
    }
}

/// Everything the dashboard shows for one selection.
///
/// Means are `None` when no row matches the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub total_games: usize,
    pub mean_user_score: Option<f64>,
    pub mean_critic_score: Option<f64>,
    pub games_by_year: Vec<PlatformYearCount>,
    pub scores: Vec<ScorePoint>,
    pub ratings_by_genre: Vec<GenreRating>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Filter the base table and summarise what is left.
pub fn aggregate(table: &GameTable, selection: &FilterSelection) -> AggregationResult {
    let rows: Vec<&GameRecord> = filtered_indices(table, selection)
        .into_iter()
        .map(|i| &table.records()[i])
        .collect();

    let total_games = rows
        .iter()
        .map(|rec| rec.name.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    AggregationResult {
        total_games,
        mean_user_score: rounded_mean(rows.iter().map(|rec| rec.user_score)),
        mean_critic_score: rounded_mean(rows.iter().map(|rec| rec.critic_score)),
        games_by_year: count_by_platform_year(&rows),
        scores: rows
            .iter()
            .map(|rec| ScorePoint {
                user_score: rec.user_score,
                critic_score: rec.critic_score,
                genre: rec.genre.clone(),
            })
            .collect(),
        ratings_by_genre: modal_rating_by_genre(&rows),
    }
}

/// Mean rounded to two decimals, `None` for an empty input.
fn rounded_mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        return None;
    }
    Some(round2(sum / n as f64))
}

/// Two decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn count_by_platform_year(rows: &[&GameRecord]) -> Vec<PlatformYearCount> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    for rec in rows {
        *counts.entry((rec.platform.as_str(), rec.year)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((platform, year), count)| PlatformYearCount {
            platform: platform.to_string(),
            year,
            count,
        })
        .collect()
}

fn modal_rating_by_genre(rows: &[&GameRecord]) -> Vec<GenreRating> {
    let mut tallies: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    for rec in rows {
        *tallies
            .entry(rec.genre.as_str())
            .or_default()
            .entry(rec.rating.as_str())
            .or_default() += 1;
    }

    tallies
        .into_iter()
        .map(|(genre, ratings)| {
            let top = ratings.values().copied().max().unwrap_or(0);
            GenreRating {
                genre: genre.to_string(),
                ratings: ratings
                    .into_iter()
                    .filter(|(_, n)| *n == top)
                    .map(|(rating, _)| rating.to_string())
                    .collect(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart shaping
// ---------------------------------------------------------------------------

/// Cumulative counts of one platform layer in the stacked area chart.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedSeries {
    pub platform: String,
    /// `[year, cumulative count]` for every year of the axis.
    pub points: Vec<[f64; 2]>,
}

/// Stack platform×year counts into cumulative layers, bottom layer first.
///
/// The year axis is contiguous from the first to the last year present;
/// a platform without releases in a year contributes zero there.
pub fn stack_by_platform(counts: &[PlatformYearCount]) -> Vec<StackedSeries> {
    let (Some(first), Some(last)) = (
        counts.iter().map(|c| c.year).min(),
        counts.iter().map(|c| c.year).max(),
    ) else {
        return Vec::new();
    };

    let mut per_platform: BTreeMap<&str, BTreeMap<i32, usize>> = BTreeMap::new();
    for c in counts {
        *per_platform
            .entry(c.platform.as_str())
            .or_default()
            .entry(c.year)
            .or_default() += c.count;
    }

    let mut running: Vec<usize> = vec![0; (last - first + 1) as usize];
    per_platform
        .into_iter()
        .map(|(platform, by_year)| {
            let points = (first..=last)
                .zip(running.iter_mut())
                .map(|(year, total)| {
                    *total += by_year.get(&year).copied().unwrap_or(0);
                    [year as f64, *total as f64]
                })
                .collect();
            StackedSeries {
                platform: platform.to_string(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::YearRange;

    fn two_games() -> GameTable {
        GameTable::from_records(vec![
            record("A", "PS4", "Action", 2010, 80.0, 7.5, "M"),
            record("B", "PC", "RPG", 2015, 90.0, 8.0, "T"),
        ])
    }

    fn sample() -> GameTable {
        GameTable::from_records(vec![
            record("FIFA", "PS4", "Sports", 2016, 85.0, 4.3, "E"),
            record("FIFA", "XOne", "Sports", 2016, 84.0, 4.1, "E"),
            record("Doom", "PC", "Shooter", 2016, 85.0, 8.1, "M"),
            record("Doom", "PS4", "Shooter", 2016, 87.0, 8.0, "M"),
            record("Witcher 3", "PC", "Action", 2015, 93.0, 9.3, "M"),
            record("Rayman", "PS4", "Platform", 2013, 92.0, 8.5, "E10+"),
            record("Batman", "PS4", "Action", 2015, 87.0, 7.5, "M"),
            record("Lego", "PS4", "Action", 2015, 75.0, 7.0, "E10+"),
            record("Kirby", "3DS", "Action", 2014, 81.0, 8.5, "E"),
        ])
    }

    #[test]
    fn single_platform_example() {
        let table = two_games();
        let selection = FilterSelection {
            platforms: ["PS4".to_string()].into(),
            genres: BTreeSet::new(),
            years: Some(YearRange::new(2000, 2022)),
        };

        let result = aggregate(&table, &selection);
        assert_eq!(result.total_games, 1);
        assert_eq!(result.mean_user_score, Some(7.5));
        assert_eq!(result.mean_critic_score, Some(80.0));
    }

    #[test]
    fn empty_window_yields_sentinels() {
        let table = two_games();
        let selection = FilterSelection {
            years: Some(YearRange::new(2020, 2022)),
            ..FilterSelection::default()
        };

        let result = aggregate(&table, &selection);
        assert_eq!(result.total_games, 0);
        assert_eq!(result.mean_user_score, None);
        assert_eq!(result.mean_critic_score, None);
        assert!(result.games_by_year.is_empty());
        assert!(result.scores.is_empty());
        assert!(result.ratings_by_genre.is_empty());
    }

    #[test]
    fn empty_selection_aggregates_whole_table() {
        let table = sample();
        let unrestricted = aggregate(&table, &FilterSelection::default());
        let everything = aggregate(&table, &FilterSelection::everything(&table));

        assert_eq!(unrestricted, everything);
        assert_eq!(unrestricted.scores.len(), table.len());
    }

    #[test]
    fn counts_distinct_names() {
        let result = aggregate(&sample(), &FilterSelection::default());
        // FIFA and Doom each appear on two platforms.
        assert_eq!(result.total_games, 7);
    }

    #[test]
    fn means_are_rounded_to_two_decimals() {
        let table = GameTable::from_records(vec![
            record("A", "PC", "RPG", 2010, 80.0, 7.0, "T"),
            record("B", "PC", "RPG", 2010, 81.0, 7.1, "T"),
            record("C", "PC", "RPG", 2010, 81.0, 7.1, "T"),
        ]);
        let result = aggregate(&table, &FilterSelection::default());
        assert_eq!(result.mean_user_score, Some(7.07));
        assert_eq!(result.mean_critic_score, Some(80.67));
    }

    #[test]
    fn rounding_ties_go_to_even() {
        let table = GameTable::from_records(vec![
            record("A", "PC", "RPG", 2010, 0.0, 0.0, "T"),
            record("B", "PC", "RPG", 2010, 0.75, 0.25, "T"),
        ]);
        let result = aggregate(&table, &FilterSelection::default());
        assert_eq!(result.mean_user_score, Some(0.12));
        assert_eq!(result.mean_critic_score, Some(0.38));
    }

    #[test]
    fn groups_by_platform_then_year() {
        let result = aggregate(&sample(), &FilterSelection::default());
        let rows: Vec<(&str, i32, usize)> = result
            .games_by_year
            .iter()
            .map(|c| (c.platform.as_str(), c.year, c.count))
            .collect();
        assert_eq!(
            rows,
            [
                ("3DS", 2014, 1),
                ("PC", 2015, 1),
                ("PC", 2016, 1),
                ("PS4", 2013, 1),
                ("PS4", 2015, 2),
                ("PS4", 2016, 2),
                ("XOne", 2016, 1),
            ]
        );
    }

    #[test]
    fn scatter_keeps_table_order() {
        let table = sample();
        let selection = FilterSelection {
            genres: ["Shooter".to_string()].into(),
            ..FilterSelection::default()
        };
        let result = aggregate(&table, &selection);
        assert_eq!(
            result.scores,
            [
                ScorePoint {
                    user_score: 8.1,
                    critic_score: 85.0,
                    genre: "Shooter".to_string(),
                },
                ScorePoint {
                    user_score: 8.0,
                    critic_score: 87.0,
                    genre: "Shooter".to_string(),
                },
            ]
        );
    }

    #[test]
    fn modal_rating_per_genre() {
        let result = aggregate(&sample(), &FilterSelection::default());
        let modes: Vec<(&str, Vec<&str>)> = result
            .ratings_by_genre
            .iter()
            .map(|g| (g.genre.as_str(), g.ratings.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(
            modes,
            [
                ("Action", vec!["M"]),
                ("Platform", vec!["E10+"]),
                ("Shooter", vec!["M"]),
                ("Sports", vec!["E"]),
            ]
        );
    }

    #[test]
    fn mode_ties_keep_every_value_sorted() {
        let table = GameTable::from_records(vec![
            record("A", "PC", "RPG", 2010, 80.0, 7.0, "T"),
            record("B", "PC", "RPG", 2010, 80.0, 7.0, "M"),
            record("C", "PC", "RPG", 2010, 80.0, 7.0, "E"),
            record("D", "PC", "RPG", 2010, 80.0, 7.0, "M"),
            record("E", "PC", "RPG", 2010, 80.0, 7.0, "E"),
        ]);
        let result = aggregate(&table, &FilterSelection::default());
        assert_eq!(result.ratings_by_genre[0].ratings, ["E", "M"]);
        assert_eq!(result.ratings_by_genre[0].primary(), "E");
    }

    #[test]
    fn year_window_applies_after_platform_filter() {
        let table = sample();
        let selection = FilterSelection {
            platforms: ["PC".to_string()].into(),
            genres: BTreeSet::new(),
            years: Some(YearRange::new(2013, 2015)),
        };
        let result = aggregate(&table, &selection);
        assert_eq!(result.total_games, 1);
        assert_eq!(result.mean_critic_score, Some(93.0));
    }

    #[test]
    fn stacking_fills_gaps_and_accumulates() {
        let counts = vec![
            PlatformYearCount {
                platform: "PC".to_string(),
                year: 2010,
                count: 2,
            },
            PlatformYearCount {
                platform: "PC".to_string(),
                year: 2012,
                count: 1,
            },
            PlatformYearCount {
                platform: "Wii".to_string(),
                year: 2011,
                count: 3,
            },
        ];

        let stacked = stack_by_platform(&counts);
        assert_eq!(stacked.len(), 2);
        assert_eq!(stacked[0].platform, "PC");
        assert_eq!(
            stacked[0].points,
            [[2010.0, 2.0], [2011.0, 0.0], [2012.0, 1.0]]
        );
        assert_eq!(stacked[1].platform, "Wii");
        assert_eq!(
            stacked[1].points,
            [[2010.0, 2.0], [2011.0, 3.0], [2012.0, 1.0]]
        );
    }

    #[test]
    fn stacking_nothing_is_empty() {
        assert!(stack_by_platform(&[]).is_empty());
    }
}
