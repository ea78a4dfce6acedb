use std::path::PathBuf;

use eframe::egui;

use crate::state::{AppState, DEFAULT_DATA_PATH};
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CropScopeApp {
    pub state: AppState,
}

impl Default for CropScopeApp {
    fn default() -> Self {
        let mut state = AppState::default();
        // Try the configured dataset straight away; a missing file just
        // leaves the error in the top bar.
        state.open_path(PathBuf::from(DEFAULT_DATA_PATH));
        Self { state }
    }
}

impl eframe::App for CropScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel(ui, &self.state);
        });
    }
}
