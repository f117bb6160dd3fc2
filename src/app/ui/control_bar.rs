use eframe::egui;
use crate::app::app_core::GSensorApp;
use crate::app::handlers::{DeviceHandler, RecordingHandler};
use crate::types::SampleRate;
use crate::utils::format_elapsed;

pub fn render_control_bar(app: &mut GSensorApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("control_bar")
        .min_height(36.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                render_buttons(app, ui);

                ui.separator();
                render_rate_selector(app, ui);

                // 右侧：录制计数和状态消息
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_recording_status(app, ui);

                    if !app.state.status.message.is_empty() {
                        ui.separator();
                        let color = if app.state.status.is_error {
                            egui::Color32::from_rgb(230, 80, 80)
                        } else {
                            egui::Color32::from_rgb(0, 150, 200)
                        };
                        ui.colored_label(color, &app.state.status.message);
                    }

                    if let Some(diagnostic) = app.state.session.last_diagnostic() {
                        if app.state.session.total_samples() == 0 {
                            ui.separator();
                            ui.colored_label(egui::Color32::GRAY, diagnostic);
                        }
                    }
                });
            });
            ui.add_space(4.0);
        });
}

fn render_buttons(app: &mut GSensorApp, ui: &mut egui::Ui) {
    let record_button = if app.state.session.is_recording() {
        egui::Button::new("⏹ Stop").fill(egui::Color32::from_rgb(170, 51, 51))
    } else {
        egui::Button::new("⏺ Record")
    };
    if ui.add(record_button).clicked() {
        RecordingHandler::toggle_recording(app);
    }

    if ui
        .add_enabled(app.state.has_data_to_save(), egui::Button::new("💾 Save CSV"))
        .clicked()
    {
        RecordingHandler::save_csv_with_dialog(app);
    }

    if ui.button("🗑 Clear").clicked() {
        DeviceHandler::clear_data(app);
    }

    let connected = app.state.connection.is_connected();
    if ui.add_enabled(connected, egui::Button::new("↺ Reset Peak")).clicked() {
        DeviceHandler::reset_peak(app);
    }

    if !connected && ui.button("🔌 Reconnect").clicked() {
        DeviceHandler::reconnect(app);
    }
}

fn render_rate_selector(app: &mut GSensorApp, ui: &mut egui::Ui) {
    let mut selected = app.state.connection.current_rate;
    ui.add_enabled_ui(app.state.connection.is_connected(), |ui| {
        egui::ComboBox::from_label("Sample rate")
            .selected_text(selected.to_string())
            .show_ui(ui, |ui| {
                for rate in SampleRate::ALL {
                    ui.selectable_value(&mut selected, rate, rate.to_string());
                }
            });
    });

    if selected != app.state.connection.current_rate {
        DeviceHandler::set_sample_rate(app, selected);
    }
}

fn render_recording_status(app: &GSensorApp, ui: &mut egui::Ui) {
    let recorder = app.state.session.recorder();
    if recorder.is_recording() {
        ui.colored_label(
            egui::Color32::from_rgb(255, 68, 68),
            format!(
                "REC {}Hz: {} ({})",
                app.config.get_config().recording_rate().hz(),
                recorder.len(),
                format_elapsed(recorder.elapsed_secs())
            ),
        );
    } else {
        ui.colored_label(egui::Color32::GRAY, "Space: Record");
    }
}
