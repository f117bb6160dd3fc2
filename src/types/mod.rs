pub mod sample;
pub mod command;
pub mod results;

pub use sample::Sample;
pub use command::{DeviceCommand, SampleRate};
pub use results::{DrainReport, RecordingSummary};
