use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Measured vs. predicted plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot and trend line in the central panel.
pub fn regression_plot(ui: &mut Ui, state: &ViewerState) {
    let chart = &state.chart;

    let mut plot = Plot::new("regression_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if state.lock_axes {
        plot = plot
            .include_x(chart.x_range.0)
            .include_x(chart.x_range.1)
            .include_y(chart.y_range.0)
            .include_y(chart.y_range.1);
    }

    plot.show(ui, |plot_ui| {
        let points: PlotPoints = chart.points.iter().map(|&(x, y)| [x, y]).collect();
        plot_ui.points(
            Points::new(points)
                .name("records")
                .color(Color32::LIGHT_BLUE)
                .radius(3.0),
        );

        if state.show_trend_line {
            let segment: PlotPoints = chart.line.iter().map(|&(x, y)| [x, y]).collect();
            plot_ui.line(
                Line::new(segment)
                    .name(state.trend_equation())
                    .color(Color32::RED)
                    .width(2.0),
            );
        }
    });
}
