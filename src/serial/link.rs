use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use log::{info, warn};
use serialport::{ClearBuffer, SerialPort, SerialPortType};

use super::LineSource;
use crate::config::SerialConfig;

/// 单次 read 的最大字节数
const READ_CHUNK: usize = 4096;

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Error connecting to {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),
}

/// `--list` 输出的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortListing {
    pub device: String,
    pub description: String,
}

pub fn list_ports() -> Result<Vec<PortListing>, LinkError> {
    let ports = serialport::available_ports().map_err(LinkError::Enumerate)?;
    Ok(ports
        .into_iter()
        .map(|port| {
            let description = match &port.port_type {
                SerialPortType::UsbPort(usb) => usb
                    .product
                    .clone()
                    .or_else(|| usb.manufacturer.clone())
                    .unwrap_or_else(|| format!("USB {:04x}:{:04x}", usb.vid, usb.pid)),
                SerialPortType::PciPort => "PCI serial port".to_string(),
                SerialPortType::BluetoothPort => "Bluetooth serial port".to_string(),
                SerialPortType::Unknown => "n/a".to_string(),
            };
            PortListing {
                device: port.port_name,
                description,
            }
        })
        .collect())
}

/// 已打开的串口连接
///
/// 句柄随 `SerialLink` 一起释放，断开连接只需 drop。
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
    pending: Vec<u8>,
}

impl SerialLink {
    pub fn open(config: &SerialConfig) -> Result<Self, LinkError> {
        let mut port = serialport::new(&config.port, config.baud)
            .timeout(Duration::from_millis(config.timeout_ms))
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .flow_control(serialport::FlowControl::None)
            .open()
            .map_err(|source| LinkError::Open {
                port: config.port.clone(),
                source,
            })?;

        info!("Connected to {} at {} baud", config.port, config.baud);

        // 丢掉连接前积压的数据，再等设备稳定
        if let Err(e) = port.clear(ClearBuffer::Input) {
            warn!("Failed to clear input buffer on {}: {}", config.port, e);
        }
        thread::sleep(Duration::from_millis(config.settle_ms));

        Ok(Self {
            port,
            name: config.port.clone(),
            pending: Vec::with_capacity(READ_CHUNK),
        })
    }
}

impl LineSource for SerialLink {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(line) = take_line(&mut self.pending) {
                return Ok(Some(line));
            }

            // 只读已经到达的字节，安静的设备不会卡住界面刷新
            let available = self.port.bytes_to_read().map_err(io::Error::from)? as usize;
            if available == 0 {
                return Ok(None);
            }
            if !fill_pending(self.port.as_mut(), available, &mut self.pending)? {
                return Ok(None);
            }
        }
    }

    fn send_command(&mut self, command: &[u8]) -> io::Result<()> {
        self.port.write_all(command)?;
        self.port.flush()
    }
}

/// 从 `pending` 取出第一行完整的行，去掉 `\n` / `\r\n` 结尾
///
/// 没有换行符时保持 `pending` 不变，半行留到下一次读取。
fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let pos = pending.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = pending.drain(..=pos).collect();
    let text = String::from_utf8_lossy(&line);
    Some(text.trim_end_matches(['\r', '\n']).to_string())
}

/// 读最多 `available` 字节追加到 `pending`
///
/// 超时返回 `Ok(false)`；读到 0 字节说明设备已断开。
fn fill_pending<R: Read + ?Sized>(
    reader: &mut R,
    available: usize,
    pending: &mut Vec<u8>,
) -> io::Result<bool> {
    let mut chunk = [0u8; READ_CHUNK];
    let want = available.clamp(1, READ_CHUNK);
    loop {
        match reader.read(&mut chunk[..want]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "serial device closed",
                ))
            }
            Ok(n) => {
                pending.extend_from_slice(&chunk[..n]);
                return Ok(true);
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => return Ok(false),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        info!("Disconnected from serial port {}", self.name);
    }
}
