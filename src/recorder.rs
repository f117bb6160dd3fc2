use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use log::info;

use crate::types::{RecordingSummary, Sample};

pub const CSV_HEADER: &str = "timestamp_ms,x,y,z,magnitude,peak";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No data to save. Start recording first.")]
    EmptyLog,
    #[error("Error saving {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 写在 CSV 顶部的 `#` 注释块内容
#[derive(Debug, Clone)]
pub struct ExportHeader {
    pub port: String,
    pub baud: u32,
    pub sample_rate_hz: u32,
}

/// 录制器：只在录制期间收集样本，按需导出 CSV
#[derive(Debug, Default)]
pub struct Recorder {
    recording: bool,
    log: Vec<Sample>,
    started_at: Option<DateTime<Local>>,
    started_instant: Option<Instant>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[cfg(test)]
    pub fn samples(&self) -> &[Sample] {
        &self.log
    }

    #[cfg(test)]
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// 从开始录制到现在的秒数
    pub fn elapsed_secs(&self) -> f64 {
        self.started_instant
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// 开始新的录制，清空上一次的日志
    pub fn start(&mut self) {
        self.log.clear();
        self.recording = true;
        let now = Local::now();
        self.started_at = Some(now);
        self.started_instant = Some(Instant::now());
        info!("Recording started at {}", now.format("%H:%M:%S"));
    }

    /// 停止录制，日志保留到下一次 start 或 clear
    pub fn stop(&mut self) -> RecordingSummary {
        self.recording = false;
        let summary = RecordingSummary::new(self.log.len(), self.elapsed_secs());
        info!("{}", summary.message());
        summary
    }

    /// 设备出错时强制停止，返回已经录到的样本数
    pub fn abort(&mut self) -> usize {
        self.recording = false;
        self.log.len()
    }

    pub fn push(&mut self, sample: Sample) {
        if self.recording {
            self.log.push(sample);
        }
    }

    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// 导出到 `path`，返回写出的样本行数
    ///
    /// 先写同目录下的临时文件，成功后再重命名到目标路径；
    /// 失败时删除临时文件，目标路径不会出现写了一半的文件。
    pub fn export(&self, path: &Path, header: &ExportHeader) -> Result<usize, ExportError> {
        if self.log.is_empty() {
            return Err(ExportError::EmptyLog);
        }

        let tmp_path = partial_path(path);
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Err(e) = self.write_csv(&tmp_path, header) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }

        info!("Saved {} samples to {}", self.log.len(), path.display());
        Ok(self.log.len())
    }

    fn write_csv(&self, path: &Path, header: &ExportHeader) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);

        writeln!(file, "# gSENSOR Data Export")?;
        writeln!(file, "# Port: {}", header.port)?;
        writeln!(file, "# Baud: {}", header.baud)?;
        writeln!(file, "# Sample Rate: {} Hz", header.sample_rate_hz)?;
        if let Some(started_at) = self.started_at {
            writeln!(file, "# Start: {}", started_at.format("%Y-%m-%d %H:%M:%S"))?;
        }
        writeln!(file, "# Samples: {}", self.log.len())?;

        writeln!(file, "{}", CSV_HEADER)?;
        for sample in &self.log {
            writeln!(file, "{}", sample.csv_row())?;
        }

        file.flush()?;
        file.get_ref().sync_all()
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.csv".to_string());
    path.with_file_name(format!(".{}.part", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> ExportHeader {
        ExportHeader {
            port: "/dev/ttyACM0".to_string(),
            baud: 115200,
            sample_rate_hz: 200,
        }
    }

    fn sample(ts: i64) -> Sample {
        Sample::new(ts, (ts - 5000) as f64 / 1000.0, 0.5, -0.25, 1.0, 1.5, 2.0)
    }

    #[test]
    fn only_collects_while_recording() {
        let mut recorder = Recorder::new();
        recorder.push(sample(1));
        assert!(recorder.is_empty());

        recorder.start();
        recorder.push(sample(2));
        recorder.push(sample(3));
        let summary = recorder.stop();
        recorder.push(sample(4));

        assert_eq!(summary.samples, 2);
        assert_eq!(recorder.len(), 2);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn start_clears_previous_log() {
        let mut recorder = Recorder::new();
        recorder.start();
        recorder.push(sample(1));
        recorder.stop();
        recorder.start();
        assert!(recorder.is_empty());
        assert!(recorder.started_at().is_some());
    }

    #[test]
    fn exports_header_block_and_original_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");

        let mut recorder = Recorder::new();
        recorder.start();
        for i in 0..50 {
            recorder.push(sample(5000 + i * 5));
        }
        recorder.stop();

        let written = recorder.export(&path, &header()).unwrap();
        assert_eq!(written, 50);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let comments: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with('#')).collect();
        assert_eq!(comments.len(), 6);
        assert_eq!(comments[1], "# Port: /dev/ttyACM0");
        assert_eq!(comments[2], "# Baud: 115200");
        assert_eq!(comments[3], "# Sample Rate: 200 Hz");
        assert!(comments[4].starts_with("# Start: "));
        assert_eq!(comments[5], "# Samples: 50");

        let body = &lines[comments.len()..];
        assert_eq!(body[0], CSV_HEADER);
        assert_eq!(body.len(), 51);
        assert_eq!(body[1], "5000,0.5,-0.25,1.0,1.5,2.0");
        assert!(body[50].starts_with("5245,"));

        // 不留临时文件
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_log_fails_without_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let recorder = Recorder::new();
        let err = recorder.export(&path, &header()).unwrap_err();
        assert!(matches!(err, ExportError::EmptyLog));
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("out.csv");

        let mut recorder = Recorder::new();
        recorder.start();
        recorder.push(sample(1));
        recorder.stop();

        let err = recorder.export(&path, &header()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn abort_reports_partial_count() {
        let mut recorder = Recorder::new();
        recorder.start();
        recorder.push(sample(1));
        recorder.push(sample(2));
        assert_eq!(recorder.abort(), 2);
        assert!(!recorder.is_recording());
        assert_eq!(recorder.len(), 2);
    }
}
