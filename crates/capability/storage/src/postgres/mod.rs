//! # PostgreSQL 存储实现模块
//!
//! 本模块提供配置库接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 查询使用参数绑定，防止 SQL 注入攻击
//! 2. **显式实例**：每次 `begin` 都指定数据库实例与凭据
//! 3. **短连接**：每次生命周期操作一个连接、一个事务，结束即关闭
//!
//! ## 数据库模式要求
//!
//! 见仓库根目录 `migrations/0001_spare_schema.sql`：
//! - `systems`：系统表（sys_id, sys_name, sys_tp_id, sys_class_id, sys_is_obsolete, sys_is_spare_combination）
//! - `properties`：属性定义表（pro_id, pro_name）
//! - `system_properties`：系统属性表（spr_id, spr_sys_id, spr_pro_id, spr_value）
//! - `components`：组件表（cmp_id）
//! - `component_systems`：组件关联表（cs_sys_id, cs_cmp_id）
//!
//! `sys_name` 上的唯一约束保证同一组合系统不会被重复创建。
//!
//! ## 事务
//!
//! ```rust,ignore
//! let mut tx = store.begin(DatastoreInstance::Development, &credential).await?;
//! tx.set_system_property("RFMAG.866.19.ETH1", "DEVICE.SPARE_ID", "0").await?;
//! tx.commit().await?;
//! ```
//!
//! 事务对象被丢弃而未提交时，sqlx 自动回滚。

pub mod spare;

pub use spare::*;
