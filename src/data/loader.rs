use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{GameRecord, GameTable, MAX_YEAR, MIN_YEAR};

/// Columns every source file must carry. Extra columns are allowed.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Name",
    "Platform",
    "Genre",
    "Year_of_Release",
    "Critic_Score",
    "User_Score",
    "Rating",
];

/// Cell contents treated as a missing value, matching the pandas defaults.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors and load report
// ---------------------------------------------------------------------------

/// Fatal problems with the source file. Bad rows are never an error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Why a row was dropped during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discard {
    Missing,
    BadYear,
    BadScore,
    OutOfWindow,
}

/// Row counts gathered while cleaning a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub kept: usize,
    /// Rows with a missing cell or the wrong number of fields.
    pub missing_values: usize,
    pub bad_year: usize,
    pub bad_score: usize,
    pub out_of_window: usize,
}

impl LoadReport {
    pub fn discarded(&self) -> usize {
        self.missing_values + self.bad_year + self.bad_score + self.out_of_window
    }

    fn count(&mut self, reason: Discard) {
        match reason {
            Discard::Missing => self.missing_values += 1,
            Discard::BadYear => self.bad_year += 1,
            Discard::BadScore => self.bad_score += 1,
            Discard::OutOfWindow => self.out_of_window += 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the games CSV at `path`.
pub fn load_file(path: &Path) -> Result<GameTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (table, report) = read_games(file)?;

    log::info!(
        "Loaded {} games from {} ({} rows read, {} discarded: {} missing, {} bad year, {} bad score, {} outside {MIN_YEAR}-{MAX_YEAR})",
        report.kept,
        path.display(),
        report.rows_read,
        report.discarded(),
        report.missing_values,
        report.bad_year,
        report.bad_score,
        report.out_of_window,
    );

    Ok(table)
}

/// Read and clean games from any CSV source with a header row.
///
/// Rows with missing cells, non-numeric scores or a release year outside
/// the supported window are dropped and counted in the [`LoadReport`].
pub fn read_games<R: Read>(source: R) -> Result<(GameTable, LoadReport), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        report.rows_read += 1;

        match clean_row(&row, headers.len(), &columns) {
            Ok(record) => records.push(record),
            Err(reason) => {
                log::trace!("Discarding row {row_no}: {reason:?}");
                report.count(reason);
            }
        }
    }

    report.kept = records.len();
    Ok((GameTable::from_records(records), report))
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header.
struct ColumnIndex {
    name: usize,
    platform: usize,
    genre: usize,
    year: usize,
    critic_score: usize,
    user_score: usize,
    rating: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let positions: BTreeMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !positions.contains_key(*col))
            .map(|col| col.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let at = |col: &str| positions[col];
        Ok(ColumnIndex {
            name: at("Name"),
            platform: at("Platform"),
            genre: at("Genre"),
            year: at("Year_of_Release"),
            critic_score: at("Critic_Score"),
            user_score: at("User_Score"),
            rating: at("Rating"),
        })
    }
}

fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

fn clean_row(
    row: &csv::StringRecord,
    width: usize,
    columns: &ColumnIndex,
) -> Result<GameRecord, Discard> {
    if row.len() != width || row.iter().any(is_missing) {
        return Err(Discard::Missing);
    }
    // Width was checked above, so every index is in bounds.
    let cell = |idx: usize| row.get(idx).unwrap_or_default();

    let year = parse_year(cell(columns.year)).ok_or(Discard::BadYear)?;
    let critic_score = parse_score(cell(columns.critic_score)).ok_or(Discard::BadScore)?;
    let user_score = parse_score(cell(columns.user_score)).ok_or(Discard::BadScore)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Discard::OutOfWindow);
    }

    Ok(GameRecord {
        name: cell(columns.name).to_string(),
        platform: cell(columns.platform).to_string(),
        genre: cell(columns.genre).to_string(),
        year,
        critic_score,
        user_score,
        rating: cell(columns.rating).to_string(),
    })
}

/// Years often arrive as floats (`2006.0`); the fractional part is dropped.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    let value = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let truncated = value.trunc();
    if truncated < i32::MIN as f64 || truncated > i32::MAX as f64 {
        return None;
    }
    Some(truncated as i32)
}

fn parse_score(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
