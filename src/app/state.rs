use std::time::Instant;

use crate::buffer::BufferSnapshot;
use crate::config::AppConfig;
use crate::display::ViewFrame;
use crate::serial::LineSource;
use crate::session::Session;
use crate::types::SampleRate;

/// 应用状态管理模块
/// 采集数据本身在 Session 里，这里只放界面和连接相关的状态

/// 串口连接状态
pub struct ConnectionState {
    pub link: Option<Box<dyn LineSource>>,
    pub port: String,
    pub baud: u32,
    pub current_rate: SampleRate,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}

/// 状态栏消息
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub is_error: bool,
}

impl StatusState {
    pub fn info(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = false;
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.is_error = true;
    }
}

/// 当前帧的绘图数据
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub snapshot: BufferSnapshot,
    pub view: Option<ViewFrame>,
}

/// 统一的应用状态管理
pub struct AppState {
    pub session: Session,
    pub connection: ConnectionState,
    pub status: StatusState,
    pub frame: FrameState,
    /// `--duration` 指定的结束时间
    pub deadline: Option<Instant>,
}

impl AppState {
    pub fn new(session: Session, link: Option<Box<dyn LineSource>>, config: &AppConfig) -> Self {
        Self {
            session,
            connection: ConnectionState {
                link,
                port: config.serial.port.clone(),
                baud: config.serial.baud,
                current_rate: config.display_rate(),
            },
            status: StatusState::default(),
            frame: FrameState::default(),
            deadline: None,
        }
    }

    /// 获取当前状态摘要
    pub fn get_status_summary(&self) -> &'static str {
        if !self.connection.is_connected() {
            "Disconnected"
        } else if self.session.is_recording() {
            "Recording"
        } else if self.session.total_samples() == 0 {
            "Waiting"
        } else {
            "Streaming"
        }
    }

    pub fn has_data_to_save(&self) -> bool {
        !self.session.recorder().is_empty()
    }
}
