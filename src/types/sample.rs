/// 一次解析后的加速度计读数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp_ms: i64, // 设备原始时间戳，导出 CSV 时原样写出
    pub time_offset: f64,  // 相对本次会话 epoch 的秒数
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub magnitude: f64,
    pub peak: f64,
}

impl Sample {
    pub fn new(timestamp_ms: i64, time_offset: f64, x: f64, y: f64, z: f64, magnitude: f64, peak: f64) -> Self {
        Self { timestamp_ms, time_offset, x, y, z, magnitude, peak }
    }

    /// CSV 数据行，字段顺序与表头 `timestamp_ms,x,y,z,magnitude,peak` 一致
    ///
    /// 浮点列总是带小数点（`1.0` 而不是 `1`）。
    pub fn csv_row(&self) -> String {
        format!(
            "{},{:?},{:?},{:?},{:?},{:?}",
            self.timestamp_ms, self.x, self.y, self.z, self.magnitude, self.peak
        )
    }
}
