use std::fmt;

/// 设备端支持的采样率，和固件 config.h 保持一致
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleRate {
    Hz100,
    Hz200,
    Hz400,
    Hz800,
}

impl SampleRate {
    pub const ALL: [SampleRate; 4] = [Self::Hz100, Self::Hz200, Self::Hz400, Self::Hz800];

    pub fn hz(self) -> u32 {
        match self {
            Self::Hz100 => 100,
            Self::Hz200 => 200,
            Self::Hz400 => 400,
            Self::Hz800 => 800,
        }
    }

    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|rate| rate.hz() == hz)
    }

    /// 命令键 s1..s4
    pub fn key(self) -> u8 {
        match self {
            Self::Hz100 => 1,
            Self::Hz200 => 2,
            Self::Hz400 => 3,
            Self::Hz800 => 4,
        }
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// 写回设备的控制命令
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceCommand {
    SetSampleRate(SampleRate),
    ResetPeak,
}

impl DeviceCommand {
    pub fn to_bytes(self) -> Vec<u8> {
        match self {
            Self::SetSampleRate(rate) => format!("s{}", rate.key()).into_bytes(),
            Self::ResetPeak => b"r".to_vec(),
        }
    }
}
