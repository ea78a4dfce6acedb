use std::collections::BTreeMap;

use eframe::egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Text};

use crate::data::bin::bin_label;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Best-crop bar chart (central panel)
// ---------------------------------------------------------------------------

/// Render the grouped bar chart: one bar per interval at x = bin index, bar
/// height = winning crop's count, one series per crop so the legend lists
/// crops. Using the bin index as the x coordinate keeps the axis in
/// ascending temperature order no matter how the rows arrive.
pub fn best_crop_chart(ui: &mut Ui, state: &AppState) {
    let analysis = &state.analysis;
    if analysis.best.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to plot – all intervals are empty.");
        });
        return;
    }

    let mut bars_by_crop: BTreeMap<&str, Vec<Bar>> = BTreeMap::new();
    for row in &analysis.best {
        bars_by_crop
            .entry(row.label.as_str())
            .or_default()
            .push(Bar::new(row.bin as f64, row.count as f64).width(0.7));
    }

    let bin_count = analysis.bins.map(|b| b.count()).unwrap_or(0);

    Plot::new("best_crop_chart")
        .legend(Legend::default())
        .x_axis_label("Temperature interval")
        .y_axis_label("Recommendation count")
        .x_axis_formatter(move |mark, _range| {
            // Ticks only at whole bin indices; fractional grid lines stay
            // unlabeled.
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() < 1e-6 && rounded >= 0.0 && (rounded as usize) < bin_count
            {
                bin_label(rounded as usize)
            } else {
                String::new()
            }
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (crop, bars) in bars_by_crop {
                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(crop))
                    .unwrap_or(Color32::LIGHT_BLUE);
                plot_ui.bar_chart(BarChart::new(bars).name(crop).color(color));
            }

            // Crop name above each bar.
            for row in &analysis.best {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(row.bin as f64, row.count as f64),
                        RichText::new(row.label.as_str()).small(),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}
