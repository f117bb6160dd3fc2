use eframe::egui;
use crate::app::app_core::GSensorApp;
use crate::plotter::render_live_plot;

pub fn render_main_panel(app: &mut GSensorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        // 少于两个点时不画线
        match &app.state.frame.view {
            Some(view) => {
                render_live_plot(ui, &app.state.frame.snapshot, view, &app.config.get_config().plot);
            }
            None => {
                ui.centered_and_justified(|ui| {
                    let hint = if app.state.connection.is_connected() {
                        "Waiting for data..."
                    } else {
                        "Serial port disconnected. Press Reconnect to resume."
                    };
                    ui.label(egui::RichText::new(hint).size(20.0).color(egui::Color32::GRAY));
                });
            }
        }
    });
}
