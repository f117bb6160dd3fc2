use log::{error, info, warn};

use crate::app::app_core::GSensorApp;
use crate::app::state::FrameState;
use crate::serial::SerialLink;
use crate::types::{DeviceCommand, SampleRate};

pub struct DeviceHandler;

impl DeviceHandler {
    /// 向设备发送命令，未连接或写失败时返回 false
    pub fn send_command(app: &mut GSensorApp, command: DeviceCommand) -> bool {
        let Some(link) = app.state.connection.link.as_mut() else {
            warn!("Cannot send {:?}: not connected", command);
            app.state.status.error("Not connected");
            return false;
        };

        match link.send_command(&command.to_bytes()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to send {:?}: {}", command, e);
                app.state.status.error(format!("Failed to send command: {}", e));
                false
            }
        }
    }

    pub fn set_sample_rate(app: &mut GSensorApp, rate: SampleRate) {
        if Self::send_command(app, DeviceCommand::SetSampleRate(rate)) {
            app.state.connection.current_rate = rate;
            info!("Sample rate set to {}", rate);
            app.state.status.info(format!("Sample rate set to {}", rate));
        }
    }

    pub fn reset_peak(app: &mut GSensorApp) {
        if Self::send_command(app, DeviceCommand::ResetPeak) {
            info!("Peak reset command sent.");
            app.state.status.info("Peak reset command sent.");
        }
    }

    /// 清空缓冲区和录制日志，时间轴从 0 重新开始
    pub fn clear_data(app: &mut GSensorApp) {
        app.state.session.clear();
        app.state.frame = FrameState::default();
        info!("Data cleared.");
        app.state.status.info("Data cleared.");
    }

    /// 手动重连，不会自动重试
    pub fn reconnect(app: &mut GSensorApp) {
        if app.state.connection.is_connected() {
            return;
        }

        let serial = app.config.get_config().serial.clone();
        match SerialLink::open(&serial) {
            Ok(link) => {
                app.state.connection.port = serial.port.clone();
                app.state.connection.baud = serial.baud;
                app.state.connection.link = Some(Box::new(link));
                app.state.status.info(format!("Connected to {} at {} baud", serial.port, serial.baud));

                let rate = if app.state.session.is_recording() {
                    app.config.get_config().recording_rate()
                } else {
                    app.config.get_config().display_rate()
                };
                Self::set_sample_rate(app, rate);
            }
            Err(e) => {
                error!("{}", e);
                app.state.status.error(e.to_string());
            }
        }
    }
}
