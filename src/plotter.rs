use egui::Color32;
use egui_plot::{Corner, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints};

use crate::buffer::BufferSnapshot;
use crate::config::PlotConfig;
use crate::display::ViewFrame;

/// 两个图共用时间轴
const TIME_AXIS_GROUP: &str = "gsensor_time_axis";

/// 格式化数字为固定宽度的 y 轴标签
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

fn rgb(color: [u8; 3]) -> Color32 {
    Color32::from_rgb(color[0], color[1], color[2])
}

/// 实时曲线：上面是 X/Y/Z 加速度，下面是幅值和峰值
pub fn render_live_plot(ui: &mut egui::Ui, snapshot: &BufferSnapshot, view: &ViewFrame, config: &PlotConfig) {
    let height = ((ui.available_height() - 20.0) / 2.0).max(config.plot_height * 0.5);

    ui.vertical(|ui| {
        plot_acceleration(ui, snapshot, view, config, height);
        ui.add_space(8.0);
        plot_magnitude(ui, snapshot, view, config, height);
    });
}

fn plot_acceleration(ui: &mut egui::Ui, snapshot: &BufferSnapshot, view: &ViewFrame, config: &PlotConfig, height: f32) {
    let range = config.acceleration_range;

    Plot::new("Acceleration")
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .y_axis_label("Acceleration (g)")
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .link_axis(TIME_AXIS_GROUP, [true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.time_min, -range],
                [view.time_max, range],
            ));

            let colors = &config.colors;
            for (name, series, color) in [
                ("X", &snapshot.x, colors.x_axis),
                ("Y", &snapshot.y, colors.y_axis),
                ("Z", &snapshot.z, colors.z_axis),
            ] {
                plot_ui.line(
                    Line::new(name, PlotPoints::from(snapshot.points(series)))
                        .color(rgb(color))
                        .width(1.0),
                );
            }
        });
}

fn plot_magnitude(ui: &mut egui::Ui, snapshot: &BufferSnapshot, view: &ViewFrame, config: &PlotConfig, height: f32) {
    Plot::new("Magnitude")
        .height(height)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label("Time (s)")
        .y_axis_label("Magnitude (g)")
        .x_axis_formatter(|v, _| format!("{:.1}s", v.value))
        .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
        .link_axis(TIME_AXIS_GROUP, [true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [view.time_min, 0.0],
                [view.time_max, view.magnitude_max],
            ));

            plot_ui.line(
                Line::new("Magnitude", PlotPoints::from(snapshot.points(&snapshot.magnitude)))
                    .color(rgb(config.colors.magnitude))
                    .width(1.5),
            );
            plot_ui.line(
                Line::new("Peak", PlotPoints::from(snapshot.points(&snapshot.peak)))
                    .color(rgb(config.colors.peak))
                    .style(LineStyle::dashed_loose())
                    .width(1.0),
            );
        });
}
