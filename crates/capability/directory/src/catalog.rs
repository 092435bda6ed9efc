//! 属性分类表。
//!
//! JSON 对象，键为属性名，值为属性元数据；仅关心 `from_spare_converter`：
//!
//! ```json
//! {
//!   "DEVICE.SPARE_ID": {},
//!   "REF.DEFAULTS.I.ACCELERATION": { "from_spare_converter": true }
//! }
//! ```

use crate::DirectoryError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// 单个属性的分类。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyClass {
    /// 为 true 时合并取备件值，否则取运行设备值。
    #[serde(default)]
    pub from_spare_converter: bool,
}

/// 属性分类表接口。
pub trait PropertyCatalog: Send + Sync {
    /// 返回属性分类；None 表示分类表中没有该属性。
    fn lookup(&self, property: &str) -> Option<PropertyClass>;
}

/// 基于 JSON 文件的属性分类表。
#[derive(Debug, Clone, Default)]
pub struct JsonPropertyCatalog {
    entries: HashMap<String, PropertyClass>,
}

impl JsonPropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        info!(
            target: "spare.directory",
            path = %path.display(),
            properties = catalog.entries.len(),
            "property_catalog_loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self, DirectoryError> {
        let entries: HashMap<String, PropertyClass> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    /// 登记属性分类（同名覆盖）。
    pub fn with_property(mut self, name: impl Into<String>, from_spare_converter: bool) -> Self {
        self.entries.insert(
            name.into(),
            PropertyClass {
                from_spare_converter,
            },
        );
        self
    }
}

impl PropertyCatalog for JsonPropertyCatalog {
    fn lookup(&self, property: &str) -> Option<PropertyClass> {
        self.entries.get(property).copied()
    }
}
