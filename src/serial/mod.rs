pub mod link;

pub use link::{list_ports, LinkError, PortListing, SerialLink};

use std::io;

/// 采集循环读取的数据源
///
/// 真实设备由 [`SerialLink`] 实现，测试里用内存实现代替。
pub trait LineSource {
    /// 取出一行完整数据；当前没有完整的行可读时返回 `Ok(None)`，不会阻塞
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// 向设备写命令
    fn send_command(&mut self, command: &[u8]) -> io::Result<()>;
}
