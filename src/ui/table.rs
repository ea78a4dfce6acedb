use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::Analysis;
use crate::data::bin::bin_label;

// ---------------------------------------------------------------------------
// Best-crop table (central panel)
// ---------------------------------------------------------------------------

/// Render the results table: [interval, best crop, count], one row per
/// non-empty interval in ascending bin order, no row-index column.
pub fn best_crop_table(ui: &mut Ui, analysis: &Analysis) {
    let rows = &analysis.best;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Temperature interval");
            });
            header.col(|ui| {
                ui.strong("Best crop");
            });
            header.col(|ui| {
                ui.strong("Recommendations");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let entry = &rows[row.index()];
                row.col(|ui| {
                    ui.label(bin_label(entry.bin));
                });
                row.col(|ui| {
                    ui.label(entry.label.as_str());
                });
                row.col(|ui| {
                    ui.label(entry.count.to_string());
                });
            });
        });
}
