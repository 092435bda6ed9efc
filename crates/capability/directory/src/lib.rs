//! 设备目录与属性分类表。
//!
//! 两者都是只读的外部协作方：
//! - [`DeviceDirectory`]：设备名 -> 类别、网关、通道号（由 name 文件加载）
//! - [`PropertyCatalog`]：属性名 -> 是否取自备件（由 JSON 属性目录加载）

mod catalog;
mod name_file;

pub use catalog::{JsonPropertyCatalog, PropertyCatalog, PropertyClass};
pub use name_file::{DeviceDirectory, NameFileDirectory};

use std::path::PathBuf;

/// 目录加载与查询错误。
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("device {0} not found")]
    NotFound(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("name file line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("property catalog invalid: {0}")]
    Catalog(#[from] serde_json::Error),
}
