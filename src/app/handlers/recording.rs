use std::path::Path;

use chrono::Local;
use log::{error, info, warn};

use crate::app::app_core::GSensorApp;
use crate::recorder::{ExportError, ExportHeader};
use crate::utils::default_export_filename;
use super::DeviceHandler;

pub struct RecordingHandler;

impl RecordingHandler {
    /// 开始/停止录制；录制时切到高采样率，停止后切回显示采样率
    pub fn toggle_recording(app: &mut GSensorApp) {
        if app.state.session.is_recording() {
            let summary = app.state.session.stop_recording();
            let display_rate = app.config.get_config().display_rate();
            DeviceHandler::set_sample_rate(app, display_rate);
            app.state.status.info(summary.message());
        } else {
            let recording_rate = app.config.get_config().recording_rate();
            DeviceHandler::set_sample_rate(app, recording_rate);
            app.state.session.start_recording();
            info!("Recording at {} started", recording_rate);
            app.state.status.info(format!("Recording at {} started", recording_rate));
        }
    }

    pub fn export_header(app: &GSensorApp) -> ExportHeader {
        ExportHeader {
            port: app.state.connection.port.clone(),
            baud: app.state.connection.baud,
            sample_rate_hz: app.config.get_config().recording_rate().hz(),
        }
    }

    pub fn save_to_path(app: &mut GSensorApp, path: &Path) -> Result<usize, ExportError> {
        let header = Self::export_header(app);
        match app.state.session.recorder().export(path, &header) {
            Ok(count) => {
                app.state.status.info(format!("Saved {} samples to {}", count, path.display()));
                Ok(count)
            }
            Err(e) => {
                error!("{}", e);
                app.state.status.error(e.to_string());
                Err(e)
            }
        }
    }

    /// 弹出保存对话框并导出录制数据
    pub fn save_csv_with_dialog(app: &mut GSensorApp) {
        if !app.state.has_data_to_save() {
            let e = ExportError::EmptyLog;
            warn!("{}", e);
            app.state.status.error(e.to_string());
            return;
        }

        let picked = rfd::FileDialog::new()
            .set_title("Save accelerometer data")
            .add_filter("CSV files", &["csv"])
            .add_filter("All files", &["*"])
            .set_directory(app.config.get_config().get_export_directory())
            .set_file_name(default_export_filename(Local::now()))
            .save_file();

        match picked {
            Some(path) => {
                let _ = Self::save_to_path(app, &path);
            }
            None => {
                info!("Save cancelled.");
                app.state.status.info("Save cancelled.");
            }
        }
    }
}
