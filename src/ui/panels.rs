use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Left side panel – run summary
// ---------------------------------------------------------------------------

/// Render the metrics / trend summary panel.
pub fn side_panel(ui: &mut Ui, state: &ViewerState) {
    ui.heading("Evaluation");
    ui.separator();

    let m = &state.metrics;
    egui::Grid::new("metrics_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for (name, value) in [
                ("R²", format!("{:.4}", m.r_squared)),
                ("MAE", format!("{:.4}", m.mean_absolute_error)),
                ("MSE", format!("{:.4}", m.mean_squared_error)),
                ("RMSE", format!("{:.4}", m.root_mean_squared_error)),
                ("Samples", m.sample_count.to_string()),
            ] {
                ui.strong(name);
                ui.label(value);
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.heading("Trend line");
    ui.separator();
    ui.label(RichText::new(state.trend_equation()).monospace());

    let outside = state.points_outside_axes();
    if outside > 0 {
        ui.label(
            RichText::new(format!("{outside} point(s) outside the axis range"))
                .color(Color32::YELLOW),
        );
    }

    ui.add_space(8.0);
    ui.heading("Output");
    ui.separator();
    ui.label(state.chart_path.display().to_string());
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!("{} records plotted", state.chart.points.len()));

        ui.separator();

        if ui
            .selectable_label(state.show_trend_line, "Trend line")
            .clicked()
        {
            state.show_trend_line = !state.show_trend_line;
        }

        if ui.selectable_label(state.lock_axes, "Fixed axes").clicked() {
            state.lock_axes = !state.lock_axes;
        }

        ui.separator();
        ui.label(RichText::new("Close the window to exit").weak());
    });
}
