//! # 配置库存储模块
//!
//! 本模块提供备件组合系统所需的配置库读写抽象，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`SpareStore` 开启事务，`SpareTransaction` 承载事务内读写
//! 2. **数据模型层** (`models.rs`)：系统记录与新组合系统输入
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **连接管理层** (`connection.rs`)：按凭据建立单连接
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示，支持故障注入）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 核心特性
//!
//! - **事务性**：一次生命周期操作的全部写入在一个事务内提交或回滚
//! - **显式实例**：所有事务都显式指定 `DatastoreInstance` 与凭据
//! - **异步支持**：基于 Tokio 的异步 I/O
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use spare_storage::{PgSpareStore, SpareStore};
//!
//! let store = PgSpareStore::new(database_urls);
//! let mut tx = store.begin(DatastoreInstance::Production, &credential).await?;
//! let combos = tx.list_combo_systems().await?;
//! tx.commit().await?;
//! ```
//!
//! ## 设计约束
//!
//! - **禁止直接 SQL**：上层能力统一通过 `SpareTransaction` 访问配置库
//! - **参数化查询**：所有 SQL 使用参数绑定

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

pub use in_memory::{
    ComponentLink, FaultPoint, InMemoryDatabase, InMemorySpareStore, InMemoryTransaction,
    SystemPropertyRow,
};
pub use postgres::{PgSpareStore, PgSpareTransaction};
