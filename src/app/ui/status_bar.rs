use eframe::egui;
use crate::app::app_core::GSensorApp;

const RECORDING_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 68, 68);

pub fn render_status_bar(app: &mut GSensorApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                render_title(app, ui);

                // 右侧：连接信息
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let connection = &app.state.connection;
                    if connection.is_connected() {
                        ui.label(format!(
                            "{} | {} @ {} baud | {}",
                            app.state.get_status_summary(),
                            connection.port,
                            connection.baud,
                            connection.current_rate
                        ));
                        ui.colored_label(egui::Color32::from_rgb(0, 180, 0), "●");
                    } else {
                        ui.colored_label(egui::Color32::from_rgb(200, 0, 0), "Disconnected");
                    }
                });
            });
            ui.add_space(5.0);
        });
}

fn render_title(app: &GSensorApp, ui: &mut egui::Ui) {
    let recording = app.state.session.is_recording();

    let title = match &app.state.frame.view {
        Some(view) => {
            let mut title = String::from("gSENSOR Real-Time Data");
            if let Some(rate) = view.sample_rate_hz {
                title.push_str(&format!(" | {:.1} Hz", rate));
            }
            title.push_str(&format!(" | Peak: {:.2}g", view.latest_peak));
            if recording {
                title.push_str(" [REC]");
            }
            title
        }
        None => format!(
            "gSENSOR - Waiting for data... ({} samples)",
            app.state.session.total_samples()
        ),
    };

    let color = if recording {
        RECORDING_COLOR
    } else {
        ui.visuals().strong_text_color()
    };
    ui.label(egui::RichText::new(title).size(18.0).color(color).strong());
}
