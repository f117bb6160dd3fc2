/// 停止录制后的统计
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub samples: usize,
    pub elapsed_secs: f64,
    pub achieved_rate_hz: f64,
}

impl RecordingSummary {
    pub fn new(samples: usize, elapsed_secs: f64) -> Self {
        let achieved_rate_hz = if elapsed_secs > 0.0 {
            samples as f64 / elapsed_secs
        } else {
            0.0
        };
        Self {
            samples,
            elapsed_secs,
            achieved_rate_hz,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "Recording stopped. {} samples in {:.1}s ({:.1} Hz actual)",
            self.samples, self.elapsed_secs, self.achieved_rate_hz
        )
    }
}

/// 一次采集（drain）的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub accepted: usize,
    pub rejected: usize,
}
