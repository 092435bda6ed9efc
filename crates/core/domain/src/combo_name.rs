//! 组合系统命名：`<运行设备名>_<备件通道号两位补零>`。
//!
//! 编码与解码集中在 [`ComboName`]，名称格式变化只需修改本模块。

use crate::device::DeviceInfo;
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = '_';

/// 组合系统名解析失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid combo system name '{name}': expected <operational>_<channel>")]
pub struct ComboNameError {
    pub name: String,
}

/// 组合系统名（运行设备 + 备件通道号）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComboName {
    operational: String,
    channel: u8,
}

impl ComboName {
    /// 运行设备名不能为空，也不能包含 `_`，否则生成的名称无法再解析。
    pub fn new(operational: impl Into<String>, channel: u8) -> Result<Self, ComboNameError> {
        let operational = operational.into();
        if operational.is_empty() || operational.contains(SEPARATOR) {
            return Err(ComboNameError {
                name: format!("{operational}{SEPARATOR}{channel:02}"),
            });
        }
        Ok(Self {
            operational,
            channel,
        })
    }

    /// 由运行设备与备件设备生成组合系统名。
    pub fn for_pair(operational: &DeviceInfo, spare: &DeviceInfo) -> Result<Self, ComboNameError> {
        Self::new(operational.name.clone(), spare.channel)
    }

    /// 解析组合系统名。
    ///
    /// 名称按 `_` 切分后必须恰好两段，且第二段为数字通道号。
    pub fn parse(raw: &str) -> Result<Self, ComboNameError> {
        let invalid = || ComboNameError {
            name: raw.to_string(),
        };
        let mut parts = raw.split(SEPARATOR);
        let (Some(operational), Some(suffix), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let channel = suffix.parse::<u8>().map_err(|_| invalid())?;
        Self::new(operational, channel).map_err(|_| invalid())
    }

    pub fn operational(&self) -> &str {
        &self.operational
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// 激活时写入 `DEVICE.SPARE_ID` 的值（即名称后缀）。
    pub fn spare_id(&self) -> String {
        format!("{:02}", self.channel)
    }
}

impl fmt::Display for ComboName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{:02}", self.operational, SEPARATOR, self.channel)
    }
}

impl FromStr for ComboName {
    type Err = ComboNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
