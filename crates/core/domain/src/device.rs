/// 设备目录中的设备信息（只读，由 name 文件提供）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub class_id: u32,
    pub gateway: String,
    /// 网关内唯一的通道号（dongle）。
    pub channel: u8,
}

impl DeviceInfo {
    pub fn new(
        name: impl Into<String>,
        class_id: u32,
        gateway: impl Into<String>,
        channel: u8,
    ) -> Self {
        Self {
            name: name.into(),
            class_id,
            gateway: gateway.into(),
            channel,
        }
    }
}
