use crate::types::Sample;

/// 设备每行输出的字段数：timestamp_ms,x,y,z,magnitude,peak
pub const FIELD_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("expected 6 fields, got {0}")]
    FieldCount(usize),
    #[error("malformed line")]
    Malformed,
}

/// 行解析器
///
/// 持有当前会话的 epoch（第一条有效样本的时间戳），
/// 所有样本的 time_offset 都相对它计算。
#[derive(Debug, Default)]
pub struct LineParser {
    epoch_ms: Option<i64>,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn epoch_ms(&self) -> Option<i64> {
        self.epoch_ms
    }

    /// 忘掉 epoch，下一条有效样本的 time_offset 从 0 开始
    pub fn reset(&mut self) {
        self.epoch_ms = None;
    }

    pub fn parse(&mut self, line: &str) -> Result<Sample, ParseError> {
        let line = line.trim();
        // 空行 split 后会得到一个空字段，这里直接按 0 个字段拒绝
        if line.is_empty() {
            return Err(ParseError::FieldCount(0));
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount(fields.len()));
        }

        let timestamp_ms: i64 = fields[0].trim().parse().map_err(|_| ParseError::Malformed)?;
        let mut values = [0.0f64; FIELD_COUNT - 1];
        for (slot, field) in values.iter_mut().zip(&fields[1..]) {
            *slot = field.trim().parse().map_err(|_| ParseError::Malformed)?;
        }

        // 整行都解析成功后才确定 epoch
        let epoch_ms = *self.epoch_ms.get_or_insert(timestamp_ms);
        let elapsed_ms = timestamp_ms
            .checked_sub(epoch_ms)
            .ok_or(ParseError::Malformed)?;
        let time_offset = elapsed_ms as f64 / 1000.0;

        let [x, y, z, magnitude, peak] = values;
        Ok(Sample::new(timestamp_ms, time_offset, x, y, z, magnitude, peak))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let mut parser = LineParser::new();
        let sample = parser.parse("1234,0.125,-0.5,9.81,9.83,12.5\r\n").unwrap();
        assert_eq!(sample.timestamp_ms, 1234);
        assert_eq!(sample.time_offset, 0.0);
        assert_eq!(sample.x, 0.125);
        assert_eq!(sample.y, -0.5);
        assert_eq!(sample.z, 9.81);
        assert_eq!(sample.magnitude, 9.83);
        assert_eq!(sample.peak, 12.5);
    }

    #[test]
    fn offsets_are_relative_to_first_sample() {
        let mut parser = LineParser::new();
        let offsets: Vec<f64> = ["1000,0,0,0,0,0", "1100,0,0,0,0,0", "1300,0,0,0,0,0"]
            .iter()
            .map(|line| parser.parse(line).unwrap().time_offset)
            .collect();
        assert_eq!(offsets, vec![0.0, 0.1, 0.3]);
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse(""), Err(ParseError::FieldCount(0)));
        assert_eq!(parser.parse("   \n"), Err(ParseError::FieldCount(0)));
        assert_eq!(parser.parse("1,2,3,4,5"), Err(ParseError::FieldCount(5)));
        assert_eq!(parser.parse("1,2,3,4,5,6,7"), Err(ParseError::FieldCount(7)));
        assert_eq!(parser.parse("1,2,3,4,5,6,"), Err(ParseError::FieldCount(7)));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse("100,1.0,2.0,3.0,x,0.1"), Err(ParseError::Malformed));
        assert_eq!(parser.parse("1.5,1.0,2.0,3.0,4.0,0.1"), Err(ParseError::Malformed));
        assert_eq!(parser.parse("Sample rate: 100 Hz"), Err(ParseError::FieldCount(1)));
    }

    #[test]
    fn rejected_line_does_not_set_epoch() {
        let mut parser = LineParser::new();
        assert!(parser.parse("500,1.0,2.0,3.0,x,0.1").is_err());
        assert_eq!(parser.epoch_ms(), None);
        let sample = parser.parse("700,1,2,3,4,5").unwrap();
        assert_eq!(sample.time_offset, 0.0);
        assert_eq!(parser.epoch_ms(), Some(700));
    }

    #[test]
    fn timestamp_too_far_from_epoch_is_malformed() {
        let mut parser = LineParser::new();
        let first = parser.parse("-9223372036854775808,0,0,0,0,0").unwrap();
        assert_eq!(first.time_offset, 0.0);
        assert_eq!(parser.parse("9223372036854775807,0,0,0,0,0"), Err(ParseError::Malformed));
        // epoch 不受影响
        assert_eq!(parser.epoch_ms(), Some(i64::MIN));
        assert_eq!(parser.parse("-9223372036854774808,0,0,0,0,0").unwrap().time_offset, 1.0);
    }

    #[test]
    fn reset_restarts_offsets_from_zero() {
        let mut parser = LineParser::new();
        parser.parse("1000,0,0,0,0,0").unwrap();
        assert_eq!(parser.parse("6000,0,0,0,0,0").unwrap().time_offset, 5.0);
        parser.reset();
        assert_eq!(parser.parse("9000,0,0,0,0,0").unwrap().time_offset, 0.0);
    }
}
