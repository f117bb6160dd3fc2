use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::SampleRate;

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 默认配置文件名，存在时自动加载
pub const DEFAULT_CONFIG_FILE: &str = "gsensor.toml";

/// 主配置结构
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub serial: SerialConfig,
    pub buffer: BufferConfig,
    pub plot: PlotConfig,
    pub recording: RecordingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
}

/// 串口配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SerialConfig {
    pub port: String,
    pub baud: u32,
    pub timeout_ms: u64,
    /// 清空输入缓冲后等待设备稳定的时间
    pub settle_ms: u64,
    /// 连接后检查数据流的轮询次数
    pub verify_attempts: usize,
    pub verify_interval_ms: u64,
}

/// 滚动缓冲区配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BufferConfig {
    pub capacity: usize,
}

/// 绘图配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub frame_period_ms: u64,
    pub window_duration_seconds: f64,
    pub lookahead_seconds: f64,
    /// 加速度图纵轴范围 ±acceleration_range (g)
    pub acceleration_range: f64,
    pub magnitude_headroom: f64,
    /// 幅值图纵轴的最小上限 (g)
    pub magnitude_floor: f64,
    pub plot_height: f32,
    pub colors: PlotColors,
}

/// 绘图颜色配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
    pub z_axis: [u8; 3],
    pub magnitude: [u8; 3],
    pub peak: [u8; 3],
}

/// 录制配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecordingConfig {
    /// 平时显示用的采样率
    pub display_rate_hz: u32,
    /// 录制时切换到的采样率
    pub recording_rate_hz: u32,
    pub export_directory: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            serial: SerialConfig::default(),
            buffer: BufferConfig::default(),
            plot: PlotConfig::default(),
            recording: RecordingConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 900.0,
            title: "gSENSOR Real-Time Data".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port().to_string(),
            baud: 115200,
            timeout_ms: 100,
            settle_ms: 500,
            verify_attempts: 20,
            verify_interval_ms: 100,
        }
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self { capacity: 500 }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            frame_period_ms: 50, // 20 FPS
            window_duration_seconds: 10.0,
            lookahead_seconds: 0.5,
            acceleration_range: 10.0,
            magnitude_headroom: 1.2,
            magnitude_floor: 5.0,
            plot_height: 300.0,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            x_axis: [255, 0, 0],      // 红色
            y_axis: [0, 200, 0],      // 绿色
            z_axis: [0, 0, 255],      // 蓝色
            magnitude: [0, 190, 190], // 青色
            peak: [255, 165, 0],      // 橙色
        }
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            display_rate_hz: 100,
            // 115200 波特率下 200 Hz 不会溢出
            recording_rate_hz: 200,
            export_directory: ".".to_string(),
        }
    }
}

/// 各平台的默认串口设备
pub fn default_port() -> &'static str {
    if cfg!(target_os = "windows") {
        "COM3"
    } else if cfg!(target_os = "macos") {
        "/dev/cu.usbmodem1101"
    } else {
        "/dev/ttyACM0"
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    #[cfg(test)]
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content)
            .map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.serial.port.trim().is_empty() {
            return Err(ConfigError::ValidationError("Serial port must not be empty".to_string()));
        }

        if self.serial.baud == 0 {
            return Err(ConfigError::ValidationError("Baud rate must be positive".to_string()));
        }

        if self.buffer.capacity == 0 {
            return Err(ConfigError::ValidationError("Buffer capacity must be positive".to_string()));
        }

        if self.plot.frame_period_ms == 0 {
            return Err(ConfigError::ValidationError("Frame period must be positive".to_string()));
        }

        if self.plot.window_duration_seconds <= 0.0 {
            return Err(ConfigError::ValidationError("Plot window duration must be positive".to_string()));
        }

        if self.plot.magnitude_floor <= 0.0 || self.plot.magnitude_headroom < 1.0 {
            return Err(ConfigError::ValidationError("Magnitude scale must be positive with headroom >= 1".to_string()));
        }

        for hz in [self.recording.display_rate_hz, self.recording.recording_rate_hz] {
            if SampleRate::from_hz(hz).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "Unsupported sample rate {} Hz (expected 100, 200, 400 or 800)",
                    hz
                )));
            }
        }

        Ok(())
    }

    pub fn display_rate(&self) -> SampleRate {
        SampleRate::from_hz(self.recording.display_rate_hz).unwrap_or(SampleRate::Hz100)
    }

    pub fn recording_rate(&self) -> SampleRate {
        SampleRate::from_hz(self.recording.recording_rate_hz).unwrap_or(SampleRate::Hz200)
    }

    /// 获取导出目录路径
    pub fn get_export_directory(&self) -> PathBuf {
        PathBuf::from(&self.recording.export_directory)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// 配置管理器
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// 按优先级加载：显式路径 > 当前目录下的默认文件 > 内置默认值
    pub fn discover(explicit: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::new()),
        }
    }

    pub fn config_path(&self) -> Option<&std::path::Path> {
        self.config_path.as_deref()
    }

    /// 获取当前配置
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取可变配置
    pub fn get_config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
