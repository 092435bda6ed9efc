//! # 备件组合系统能力
//!
//! 运行设备与备件配对后，在配置库中生成一个"组合系统"：
//! - 名称为 `<运行设备名>_<备件通道号两位>`（见 `domain::ComboName`）
//! - 系统类型与组件关联取自备件
//! - 属性按属性目录逐项取自运行设备或备件
//!
//! ## 模块
//!
//! - `gate`：配对校验（纯函数，不访问配置库）
//! - `reconcile`：属性合并
//! - `lifecycle`：创建 / 启用 / 停用 / 删除
//! - `listing`：组合系统列表、解析、可用备件
//!
//! 所有配置库写入都在单个事务内完成，失败回滚，调用方只看到一个 `ComboError`。

mod access;
mod error;
pub mod gate;
pub mod lifecycle;
pub mod listing;
pub mod reconcile;

pub use access::DatastoreAccess;
pub use error::ComboError;
pub use gate::{ValidatedPair, validate};
pub use lifecycle::{ComboLifecycle, CreatedCombo, DeletedCombo};
pub use listing::{ComboConstituents, ComboDirectory, ResolvedCombo};
pub use reconcile::{Reconciliation, fetch_and_reconcile, reconcile};
