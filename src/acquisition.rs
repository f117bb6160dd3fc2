use std::io;
use std::thread;
use std::time::Duration;

use log::{error, info, warn};

use crate::serial::LineSource;
use crate::session::Session;
use crate::types::DrainReport;
use crate::utils::truncate_chars;

#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    /// 设备层面的读错误（断开、溢出）；录制中的话 `partial_recording` 是已录到的样本数
    #[error("Serial error: {source}")]
    Device {
        #[source]
        source: io::Error,
        partial_recording: Option<usize>,
    },
}

impl AcquisitionError {
    pub fn partial_recording(&self) -> Option<usize> {
        match self {
            Self::Device { partial_recording, .. } => *partial_recording,
        }
    }
}

/// 读空数据源中已到达的所有行
///
/// 格式错误的行直接丢弃；还没收到任何有效样本时，被丢弃的行会作为诊断信息输出。
/// 设备读错误会中止本轮读取，并停止正在进行的录制，不做重试。
pub fn drain(source: &mut dyn LineSource, session: &mut Session) -> Result<DrainReport, AcquisitionError> {
    let mut report = DrainReport::default();

    loop {
        let line = match source.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(device_error(e, session)),
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let waiting_for_first = session.total_samples() == 0;
        match session.ingest_line(line) {
            Ok(_) => report.accepted += 1,
            Err(_) => {
                report.rejected += 1;
                if waiting_for_first {
                    let shown = truncate_chars(line, 60);
                    warn!("Skipping: {}", shown);
                    session.set_diagnostic(format!("Skipping: {}", shown));
                }
            }
        }
    }

    Ok(report)
}

fn device_error(source: io::Error, session: &mut Session) -> AcquisitionError {
    error!("Serial error: {}", source);
    error!("Device may have disconnected or buffer overflow occurred.");

    let partial_recording = if session.is_recording() {
        let count = session.abort_recording();
        warn!("Recording stopped with {} samples.", count);
        Some(count)
    } else {
        None
    };

    AcquisitionError::Device {
        source,
        partial_recording,
    }
}

/// 连接后确认数据流正常：最多轮询 `attempts` 次，直到解析出一条有效样本
pub fn verify_stream(
    source: &mut dyn LineSource,
    session: &mut Session,
    attempts: usize,
    interval: Duration,
) -> Result<bool, AcquisitionError> {
    info!("Waiting for data...");

    for _ in 0..attempts {
        match source.next_line() {
            Ok(Some(line)) => {
                info!("  Received: {}", truncate_chars(line.trim(), 70));
                if session.ingest_line(&line).is_ok() {
                    info!("  -> Parsed successfully!");
                    break;
                }
            }
            Ok(None) => thread::sleep(interval),
            Err(e) => return Err(device_error(e, session)),
        }
    }

    if session.total_samples() == 0 {
        warn!("No valid data parsed yet. Check sensor connection.");
        Ok(false)
    } else {
        info!("Data stream OK ({} samples)", session.total_samples());
        Ok(true)
    }
}
