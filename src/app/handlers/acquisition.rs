use log::debug;

use crate::acquisition;
use crate::app::app_core::GSensorApp;
use crate::display::compute_view;

pub struct AcquisitionHandler;

impl AcquisitionHandler {
    /// 每帧调用一次：读空串口，然后刷新绘图数据
    pub fn handle_tick(app: &mut GSensorApp) {
        if let Some(link) = app.state.connection.link.as_mut() {
            match acquisition::drain(link.as_mut(), &mut app.state.session) {
                Ok(report) => {
                    if report.rejected > 0 {
                        debug!("Dropped {} malformed lines", report.rejected);
                    }
                }
                Err(e) => {
                    // 释放串口句柄，等待用户手动重连
                    app.state.connection.link = None;
                    let message = match e.partial_recording() {
                        Some(count) => format!("{}. Recording stopped with {} samples.", e, count),
                        None => format!("{}. Reconnect to continue.", e),
                    };
                    app.state.status.error(message);
                }
            }
        }

        Self::refresh_frame(app);
    }

    fn refresh_frame(app: &mut GSensorApp) {
        let snapshot = app.state.session.snapshot();
        app.state.frame.view = compute_view(
            &snapshot,
            app.state.session.total_samples(),
            &app.config.get_config().plot,
        );
        app.state.frame.snapshot = snapshot;
    }
}
