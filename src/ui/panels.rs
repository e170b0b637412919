use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if ui.button("Reset filters").clicked() {
        state.reset_filters();
    }
    ui.add_space(4.0);

    // The table is shared, so hold our own handle while mutating the state.
    let table = Arc::clone(&state.table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year of release ----
            ui.strong("Year of release");
            match table.year_bounds() {
                Some(bounds) => {
                    let current = state.selection.years.unwrap_or(bounds);
                    let mut from = current.from();
                    let mut to = current.to();
                    let range = bounds.from()..=bounds.to();

                    let from_changed = ui
                        .add(egui::Slider::new(&mut from, range.clone()).text("from"))
                        .changed();
                    let to_changed = ui
                        .add(egui::Slider::new(&mut to, range).text("to"))
                        .changed();

                    // Dragging one handle past the other pushes it along.
                    if from_changed && from > to {
                        to = from;
                    }
                    if to_changed && to < from {
                        from = to;
                    }
                    if from_changed || to_changed {
                        state.set_years(from, to);
                    }
                }
                None => {
                    ui.label("No years available.");
                }
            }
            ui.separator();

            // ---- Platform (multi-choice) ----
            let n_platforms = state.selection.platforms.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Platform  ({})", selection_label(n_platforms))).strong(),
            )
            .id_salt("platform_filter")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_platforms();
                }
                for platform in table.platforms() {
                    let mut checked = state.selection.platforms.contains(platform);
                    let text = RichText::new(platform).color(state.platform_colors.color_for(platform));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_platform(platform);
                    }
                }
            });

            // ---- Genre (multi-choice) ----
            let n_genres = state.selection.genres.len();
            egui::CollapsingHeader::new(
                RichText::new(format!("Genre  ({})", selection_label(n_genres))).strong(),
            )
            .id_salt("genre_filter")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_genres();
                }
                for genre in table.genres() {
                    let mut checked = state.selection.genres.contains(genre);
                    let text = RichText::new(genre).color(state.genre_colors.color_for(genre));
                    if ui.checkbox(&mut checked, text).changed() {
                        state.toggle_genre(genre);
                    }
                }
            });
        });
}

/// An empty selection means no restriction.
fn selection_label(n_selected: usize) -> String {
    if n_selected == 0 {
        "all".to_string()
    } else {
        format!("{n_selected} selected")
    }
}

// ---------------------------------------------------------------------------
// Summary row – the three headline figures
// ---------------------------------------------------------------------------

/// Shown under the dashboard title.
pub const DESCRIPTION: &str = "Statistics about the games dataset. Filter by platform \
(multi-choice), genre (multi-choice) and year of release (from and to). The total number \
of games, the average players' and critics' scores, the number of games by year and \
platform, the scores by genre and the age ratings by genre follow the filters.";

/// Render the title, the description and the three headline figures.
pub fn summary_row(ui: &mut Ui, state: &AppState) {
    ui.heading("Games Dashboard");
    ui.label(DESCRIPTION);
    ui.add_space(6.0);

    let result = &state.result;
    ui.columns(3, |cols| {
        headline(&mut cols[0], "Total number of games", result.total_games.to_string());
        headline(
            &mut cols[1],
            "Average players' score",
            format_score(result.mean_user_score),
        );
        headline(
            &mut cols[2],
            "Average critics' score",
            format_score(result.mean_critic_score),
        );
    });
}

fn headline(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(32.0).strong());
}

/// Means of an empty selection are shown as `n/a`.
pub fn format_score(mean: Option<f64>) -> String {
    match mean {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} games loaded, {} matching",
            state.source.display(),
            state.table.len(),
            state.visible_rows()
        ));

        if let Some(years) = state.selection.years {
            ui.separator();
            ui.label(format!("Years {years}"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open games dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        match crate::data::loader::load_file(&path) {
            Ok(table) => state.set_table(table, path),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_format_with_two_decimals() {
        assert_eq!(format_score(Some(7.5)), "7.50");
        assert_eq!(format_score(Some(80.666)), "80.67");
        assert_eq!(format_score(None), "n/a");
    }

    #[test]
    fn description_names_every_filter() {
        for word in ["platform", "genre", "year of release"] {
            assert!(DESCRIPTION.contains(word), "missing {word}");
        }
        assert!(!DESCRIPTION.contains('\n'));
    }

    #[test]
    fn empty_selection_reads_as_all() {
        assert_eq!(selection_label(0), "all");
        assert_eq!(selection_label(3), "3 selected");
    }
}
