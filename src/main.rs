mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use app::GamesDashApp;
use cli::Args;
use data::aggregate::aggregate;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Without a valid base table there is nothing to show.
    let table = data::loader::load_file(&args.data)
        .with_context(|| format!("loading games dataset from {}", args.data.display()))?;
    let selection = args.selection(&table);

    if args.summary {
        let result = aggregate(&table, &selection);
        let json = serde_json::to_string_pretty(&result).context("serializing summary")?;
        println!("{json}");
        return Ok(());
    }

    let state = AppState::with_selection(table, args.data.clone(), selection);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Games Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(GamesDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
