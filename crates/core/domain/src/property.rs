use std::collections::BTreeMap;

/// 运行设备上指向当前备件的属性名。
pub const SPARE_ID_PROPERTY: &str = "DEVICE.SPARE_ID";

/// 未激活任何备件时 `DEVICE.SPARE_ID` 的取值。
pub const SPARE_ID_RESET: &str = "0";

/// 系统属性（属性 ID 由数据库分配）。
///
/// 值为 `None` 表示数据库中的 NULL，与空字符串区分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub value: Option<String>,
}

impl Property {
    pub fn new(id: i64, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value(id, name, Some(value.into()))
    }

    pub fn with_value(id: i64, name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            value,
        }
    }
}

/// 单个系统的属性集合：属性名 -> 属性。
///
/// 使用 BTreeMap 保证遍历与插入顺序稳定。
pub type PropertySet = BTreeMap<String, Property>;
