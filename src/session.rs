use crate::buffer::{BufferSnapshot, RollingBuffer};
use crate::parser::{LineParser, ParseError};
use crate::recorder::Recorder;
use crate::types::{RecordingSummary, Sample};

/// 一次采集会话的全部数据状态
///
/// 解析器 epoch、滚动缓冲区、录制日志和累计样本数都放在这里，
/// 采集和绘图都通过它访问，不依赖任何全局变量。
#[derive(Debug)]
pub struct Session {
    parser: LineParser,
    buffer: RollingBuffer,
    recorder: Recorder,
    total_samples: u64,
    last_diagnostic: Option<String>,
}

impl Session {
    pub fn new(buffer_capacity: usize) -> Self {
        Self {
            parser: LineParser::new(),
            buffer: RollingBuffer::new(buffer_capacity),
            recorder: Recorder::new(),
            total_samples: 0,
            last_diagnostic: None,
        }
    }

    /// 解析一行并写入缓冲区（录制中还会写入录制日志）
    pub fn ingest_line(&mut self, line: &str) -> Result<Sample, ParseError> {
        let sample = self.parser.parse(line)?;
        self.buffer.push(sample);
        self.recorder.push(sample);
        self.total_samples += 1;
        Ok(sample)
    }

    /// 清空缓冲区和录制日志，下一条样本重新作为 epoch
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.recorder.clear();
        self.parser.reset();
        self.total_samples = 0;
        self.last_diagnostic = None;
    }

    pub fn buffer(&self) -> &RollingBuffer {
        &self.buffer
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn start_recording(&mut self) {
        self.recorder.start();
    }

    pub fn stop_recording(&mut self) -> RecordingSummary {
        self.recorder.stop()
    }

    pub fn abort_recording(&mut self) -> usize {
        self.recorder.abort()
    }

    /// 累计接收的有效样本数，不受缓冲区淘汰影响
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    pub fn set_diagnostic(&mut self, message: String) {
        self.last_diagnostic = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_line_leaves_buffer_untouched() {
        let mut session = Session::new(10);
        session.ingest_line("1000,1,2,3,4,5").unwrap();
        assert!(session.ingest_line("1100,1,2,3,4").is_err());
        assert!(session.ingest_line("1100,1.0,2.0,3.0,x,0.1").is_err());
        assert_eq!(session.buffer().len(), 1);
        assert_eq!(session.total_samples(), 1);
    }

    #[test]
    fn total_count_survives_eviction() {
        let mut session = Session::new(3);
        for i in 0..8 {
            session.ingest_line(&format!("{},0,0,0,0,0", i * 10)).unwrap();
        }
        assert_eq!(session.buffer().len(), 3);
        assert_eq!(session.total_samples(), 8);
    }

    #[test]
    fn clear_resets_epoch_and_counters() {
        let mut session = Session::new(10);
        session.ingest_line("1000,0,0,0,0,0").unwrap();
        session.ingest_line("4000,0,0,0,0,0").unwrap();
        session.clear();
        assert_eq!(session.total_samples(), 0);
        assert!(session.buffer().is_empty());

        let sample = session.ingest_line("90000,0,0,0,0,0").unwrap();
        assert_eq!(sample.time_offset, 0.0);
    }

    #[test]
    fn recording_captures_only_while_active() {
        let mut session = Session::new(10);
        session.ingest_line("1000,0,0,0,0,0").unwrap();
        session.start_recording();
        session.ingest_line("1010,0,0,0,0,0").unwrap();
        session.ingest_line("1020,0,0,0,0,0").unwrap();
        let summary = session.stop_recording();
        session.ingest_line("1030,0,0,0,0,0").unwrap();

        assert_eq!(summary.samples, 2);
        let recorded: Vec<i64> = session.recorder().samples().iter().map(|s| s.timestamp_ms).collect();
        assert_eq!(recorded, vec![1010, 1020]);
    }
}
