//! name 文件设备目录。
//!
//! 每行一个设备：`gateway:channel:class_id:device_name[:...]`，
//! 空行与 `#` 开头的注释行忽略，多余字段忽略。

use crate::DirectoryError;
use domain::DeviceInfo;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// 设备目录接口。
pub trait DeviceDirectory: Send + Sync {
    /// 按设备名查询。
    fn device(&self, name: &str) -> Result<DeviceInfo, DirectoryError>;

    /// 列出网关上的全部设备（按通道号升序）。
    fn gateway_devices(&self, gateway: &str) -> Vec<DeviceInfo>;

    /// 列出指定类别的设备名，按名称升序，`filter` 为大小写不敏感的子串过滤。
    fn devices_of_class(&self, class_id: u32, filter: Option<&str>) -> Vec<String>;
}

/// 内存中的设备目录（由 name 文件或测试数据构建）。
#[derive(Debug, Clone, Default)]
pub struct NameFileDirectory {
    devices: BTreeMap<String, DeviceInfo>,
}

impl NameFileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载。
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::parse(&text)?;
        info!(
            target: "spare.directory",
            path = %path.display(),
            devices = directory.devices.len(),
            "name_file_loaded"
        );
        Ok(directory)
    }

    /// 解析 name 文件内容。
    pub fn parse(text: &str) -> Result<Self, DirectoryError> {
        let mut directory = Self::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let device = parse_line(line).map_err(|reason| DirectoryError::Parse {
                line: index + 1,
                reason,
            })?;
            directory.devices.insert(device.name.clone(), device);
        }
        Ok(directory)
    }

    /// 登记设备（同名覆盖）。
    pub fn with_device(mut self, device: DeviceInfo) -> Self {
        self.devices.insert(device.name.clone(), device);
        self
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

fn parse_line(line: &str) -> Result<DeviceInfo, String> {
    let mut fields = line.split(':').map(str::trim);
    let (Some(gateway), Some(channel), Some(class_id), Some(name)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err("expected gateway:channel:class_id:device_name".to_string());
    };
    if gateway.is_empty() || name.is_empty() {
        return Err("empty gateway or device name".to_string());
    }
    let channel = channel
        .parse::<u8>()
        .map_err(|_| format!("invalid channel '{channel}'"))?;
    let class_id = class_id
        .parse::<u32>()
        .map_err(|_| format!("invalid class id '{class_id}'"))?;
    Ok(DeviceInfo::new(name, class_id, gateway, channel))
}

impl DeviceDirectory for NameFileDirectory {
    fn device(&self, name: &str) -> Result<DeviceInfo, DirectoryError> {
        self.devices
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(name.to_string()))
    }

    fn gateway_devices(&self, gateway: &str) -> Vec<DeviceInfo> {
        let mut devices: Vec<DeviceInfo> = self
            .devices
            .values()
            .filter(|device| device.gateway == gateway)
            .cloned()
            .collect();
        devices.sort_by(|a, b| a.channel.cmp(&b.channel).then_with(|| a.name.cmp(&b.name)));
        devices
    }

    fn devices_of_class(&self, class_id: u32, filter: Option<&str>) -> Vec<String> {
        let needle = filter.map(str::to_uppercase);
        self.devices
            .values()
            .filter(|device| device.class_id == class_id)
            .filter(|device| match needle.as_deref() {
                Some(needle) => device.name.to_uppercase().contains(needle),
                None => true,
            })
            .map(|device| device.name.clone())
            .collect()
    }
}
