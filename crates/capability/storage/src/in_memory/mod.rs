//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - SpareStore: InMemorySpareStore
//! - 数据与造数：InMemoryDatabase

pub mod database;
pub mod spare;

pub use database::*;
pub use spare::*;
