//! 数据模型
//!
//! 对应配置库中的表：
//! - 系统：SystemRecord（systems）
//! - 新组合系统输入：NewComboSystem
//!
//! 系统属性直接使用领域模型 `domain::Property` / `domain::PropertySet`。

/// 系统记录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemRecord {
    pub system_id: i64,
    pub name: String,
    pub type_id: i64,
    pub class_id: i64,
    pub is_obsolete: bool,
    pub is_spare_combination: bool,
}

/// 新组合系统输入。
///
/// 系统类型取自 `template_system`（备件系统），类别由调用方给出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComboSystem {
    pub name: String,
    pub class_id: i64,
    pub template_system: String,
}
