use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::bin::{MAX_BINS, MIN_BINS};
use crate::state::AppState;
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – analysis settings and cleaning report
// ---------------------------------------------------------------------------

/// Render the settings panel: bin-count slider plus the cleaning messages.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis settings");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Temperature bins");
    let mut bin_count = state.bin_count;
    if ui
        .add(egui::Slider::new(&mut bin_count, MIN_BINS..=MAX_BINS).text("bins"))
        .changed()
    {
        state.set_bin_count(bin_count);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.strong("Data cleaning");

    let report = dataset.report;
    ui.label(format!(
        "Loaded {} rows, {} after dropping rows with missing values",
        report.rows_loaded,
        report.rows_loaded - report.missing_removed
    ));
    if report.outliers_removed > 0 {
        ui.label(
            RichText::new(format!(
                "Removed {} temperature outlier row(s) (IQR rule)",
                report.outliers_removed
            ))
            .color(Color32::YELLOW),
        );
    }
    ui.label(format!("{} rows in the analysis", dataset.len()));
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

/// Render the results: best-crop table above the grouped bar chart, both in
/// ascending bin order.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a crop dataset to start  (File → Open…)");
        });
        return;
    }

    if state.analysis.best.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records left after cleaning – nothing to analyse.");
        });
        return;
    }

    ui.heading(format!(
        "Best crop per temperature interval  ({} bins)",
        state.bin_count
    ));
    ui.add_space(4.0);

    table::best_crop_table(ui, &state.analysis);
    ui.separator();
    plot::best_crop_chart(ui, state);
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            ui.label(format!("{} records loaded", dataset.len()));
        }
        if let Some(path) = &state.source_path {
            ui.label(RichText::new(path.display().to_string()).weak());
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
        .set_title("Open crop dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(path);
    }
}
