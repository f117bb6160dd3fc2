use crate::buffer::BufferSnapshot;
use crate::config::PlotConfig;

/// 一帧绘图需要的派生状态，和 egui 无关
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    pub time_min: f64,
    pub time_max: f64,
    pub magnitude_max: f64,
    /// 瞬时采样率，会话时长为 0 时没有意义
    pub sample_rate_hz: Option<f64>,
    pub latest_peak: f64,
}

/// 根据缓冲区快照计算坐标范围和状态
///
/// 少于两个点画不出线，返回 `None`。同样的输入总是得到同样的结果。
pub fn compute_view(snapshot: &BufferSnapshot, total_samples: u64, config: &PlotConfig) -> Option<ViewFrame> {
    if snapshot.len() < 2 {
        return None;
    }

    let t_last = *snapshot.time.last()?;
    let time_min = (t_last - config.window_duration_seconds).max(0.0);
    let time_max = t_last + config.lookahead_seconds;

    let observed_max = snapshot
        .magnitude
        .iter()
        .chain(&snapshot.peak)
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let magnitude_max = (observed_max * config.magnitude_headroom).max(config.magnitude_floor);

    let sample_rate_hz = (t_last > 0.0).then(|| total_samples as f64 / t_last);

    Some(ViewFrame {
        time_min,
        time_max,
        magnitude_max,
        sample_rate_hz,
        latest_peak: *snapshot.peak.last()?,
    })
}
