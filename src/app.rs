use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GamesDashApp {
    pub state: AppState,
}

impl GamesDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GamesDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: headline figures + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::summary_row(ui, &self.state);
            ui.separator();

            let state = &self.state;
            ui.columns(3, |cols| {
                plot::games_by_year_plot(&mut cols[0], state);
                plot::score_scatter_plot(&mut cols[1], state);
                plot::rating_by_genre_plot(&mut cols[2], state);
            });
        });
    }
}
