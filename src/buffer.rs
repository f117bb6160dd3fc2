use std::collections::VecDeque;

use crate::types::Sample;

/// 供绘图读取的缓冲区快照（按字段拆开的拷贝）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferSnapshot {
    pub time: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub magnitude: Vec<f64>,
    pub peak: Vec<f64>,
}

impl BufferSnapshot {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// 把某个字段和时间轴配成 [t, v] 点列
    pub fn points(&self, series: &[f64]) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(series)
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

/// 固定容量的滚动缓冲区，满了以后丢弃最旧的样本（FIFO）
#[derive(Debug)]
pub struct RollingBuffer {
    buffer_timestamp: VecDeque<i64>,
    buffer_time: VecDeque<f64>,
    buffer_x: VecDeque<f64>,
    buffer_y: VecDeque<f64>,
    buffer_z: VecDeque<f64>,
    buffer_magnitude: VecDeque<f64>,
    buffer_peak: VecDeque<f64>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer_timestamp: VecDeque::with_capacity(capacity),
            buffer_time: VecDeque::with_capacity(capacity),
            buffer_x: VecDeque::with_capacity(capacity),
            buffer_y: VecDeque::with_capacity(capacity),
            buffer_z: VecDeque::with_capacity(capacity),
            buffer_magnitude: VecDeque::with_capacity(capacity),
            buffer_peak: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer_time.is_empty()
    }

    pub fn push(&mut self, sample: Sample) {
        // 先腾出位置，保证任何时刻 len <= capacity
        if self.buffer_time.len() == self.capacity {
            self.buffer_timestamp.pop_front();
            self.buffer_time.pop_front();
            self.buffer_x.pop_front();
            self.buffer_y.pop_front();
            self.buffer_z.pop_front();
            self.buffer_magnitude.pop_front();
            self.buffer_peak.pop_front();
        }

        self.buffer_timestamp.push_back(sample.timestamp_ms);
        self.buffer_time.push_back(sample.time_offset);
        self.buffer_x.push_back(sample.x);
        self.buffer_y.push_back(sample.y);
        self.buffer_z.push_back(sample.z);
        self.buffer_magnitude.push_back(sample.magnitude);
        self.buffer_peak.push_back(sample.peak);
    }

    pub fn clear(&mut self) {
        self.buffer_timestamp.clear();
        self.buffer_time.clear();
        self.buffer_x.clear();
        self.buffer_y.clear();
        self.buffer_z.clear();
        self.buffer_magnitude.clear();
        self.buffer_peak.clear();
    }

    /// 最新的一条样本
    pub fn latest(&self) -> Option<Sample> {
        self.get(self.len().checked_sub(1)?)
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        Some(Sample::new(
            *self.buffer_timestamp.get(index)?,
            *self.buffer_time.get(index)?,
            *self.buffer_x.get(index)?,
            *self.buffer_y.get(index)?,
            *self.buffer_z.get(index)?,
            *self.buffer_magnitude.get(index)?,
            *self.buffer_peak.get(index)?,
        ))
    }

    /// 按到达顺序遍历当前内容
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            time: self.buffer_time.iter().copied().collect(),
            x: self.buffer_x.iter().copied().collect(),
            y: self.buffer_y.iter().copied().collect(),
            z: self.buffer_z.iter().copied().collect(),
            magnitude: self.buffer_magnitude.iter().copied().collect(),
            peak: self.buffer_peak.iter().copied().collect(),
        }
    }
}
