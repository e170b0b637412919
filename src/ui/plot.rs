use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::{Color32, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::stack_by_platform;
use crate::state::AppState;

/// Deep purple from the plasma colour scale.
const RATING_COLOR: Color32 = Color32::from_rgb(126, 3, 168);

// ---------------------------------------------------------------------------
// Games by year (stacked area per platform)
// ---------------------------------------------------------------------------

/// Number of games per release year, one stacked layer per platform.
pub fn games_by_year_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Games by year");
    let layers = stack_by_platform(&state.result.games_by_year);

    Plot::new("games_by_year")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of games")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Top layer first so each lower fill paints over the one above it.
            for layer in layers.iter().rev() {
                let points: PlotPoints = layer.points.iter().copied().collect();
                let line = Line::new(points)
                    .name(&layer.platform)
                    .color(state.platform_colors.color_for(&layer.platform))
                    .fill(0.0)
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// User vs critic scores (scatter coloured by genre)
// ---------------------------------------------------------------------------

/// User score against critic score for every matching row.
pub fn score_scatter_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Scores by genre");

    let mut by_genre: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &state.result.scores {
        by_genre
            .entry(p.genre.as_str())
            .or_default()
            .push([p.user_score, p.critic_score]);
    }

    Plot::new("scores_by_genre")
        .legend(Legend::default())
        .x_axis_label("User score")
        .y_axis_label("Critic score")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Table order keeps legend entries stable across filter changes.
            for genre in state.table.genres() {
                let Some(pts) = by_genre.remove(genre.as_str()) else {
                    continue;
                };
                let points: PlotPoints = pts.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(genre)
                        .color(state.genre_colors.color_for(genre))
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Modal rating by genre (line over categorical axes + table)
// ---------------------------------------------------------------------------

/// Most common age rating per genre.
pub fn rating_by_genre_plot(ui: &mut Ui, state: &AppState) {
    ui.strong("Age rating by genre");

    let modes = &state.result.ratings_by_genre;
    let genre_labels: Vec<String> = modes.iter().map(|g| g.genre.clone()).collect();
    let rating_labels: Vec<String> = modes
        .iter()
        .map(|g| g.primary().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let coords: Vec<[f64; 2]> = modes
        .iter()
        .enumerate()
        .filter_map(|(i, g)| {
            let y = rating_labels.iter().position(|r| r == g.primary())?;
            Some([i as f64, y as f64])
        })
        .collect();

    Plot::new("rating_by_genre")
        .height(ui.available_height() * 0.6)
        .x_axis_label("Game's genre")
        .y_axis_label("Rating")
        .x_axis_formatter(move |mark, _range| category_label(&genre_labels, mark.value))
        .y_axis_formatter(move |mark, _range| category_label(&rating_labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let line: PlotPoints = coords.iter().copied().collect();
            let markers: PlotPoints = coords.iter().copied().collect();
            plot_ui.line(Line::new(line).color(RATING_COLOR).width(2.0));
            plot_ui.points(Points::new(markers).color(RATING_COLOR).radius(4.0));
        });

    ui.add_space(6.0);
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(100.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Genre");
            });
            header.col(|ui| {
                ui.strong("Most common rating");
            });
        })
        .body(|mut body| {
            for g in modes {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&g.genre);
                    });
                    row.col(|ui| {
                        ui.label(g.ratings.join(", "));
                    });
                });
            }
        });
}

/// Label for a grid mark on a categorical axis; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels.get(value as usize).cloned().unwrap_or_default()
}
