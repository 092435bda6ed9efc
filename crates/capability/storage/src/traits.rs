//! 存储接口 Trait 定义
//!
//! - SpareStore：按数据库实例开启事务（每次调用一个连接、一个事务）
//! - SpareTransaction：事务内的全部读写操作，`commit` 之前的写入对外不可见
//!
//! 设计原则：
//! - 数据库实例与凭据显式传入，不存在全局"当前实例"
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 写操作返回受影响行数，由调用方决定 0 行是否为错误

use crate::error::StorageError;
use crate::models::{NewComboSystem, SystemRecord};
use async_trait::async_trait;
use domain::{DatastoreInstance, Property, PropertySet};
use spare_credentials::Credential;

/// 配置库入口。
#[async_trait]
pub trait SpareStore: Send + Sync {
    /// 连接指定实例并开启事务。
    async fn begin(
        &self,
        instance: DatastoreInstance,
        credential: &Credential,
    ) -> Result<Box<dyn SpareTransaction>, StorageError>;
}

/// 单个事务。
///
/// 未调用 `commit` 即被丢弃的事务视为回滚。
#[async_trait]
pub trait SpareTransaction: Send {
    /// 读取系统的全部属性（属性名 -> 属性）。
    async fn system_properties(&mut self, system_name: &str) -> Result<PropertySet, StorageError>;

    /// 更新系统上某个属性的值。
    async fn set_system_property(
        &mut self,
        system_name: &str,
        property_name: &str,
        value: &str,
    ) -> Result<u64, StorageError>;

    /// 插入组合系统，返回新系统 ID；模板系统不存在时返回 None。
    async fn insert_combo_system(
        &mut self,
        combo: &NewComboSystem,
    ) -> Result<Option<i64>, StorageError>;

    /// 将 `from_system` 的组件关联复制到 `to_system_id`。
    async fn copy_component_links(
        &mut self,
        from_system: &str,
        to_system_id: i64,
    ) -> Result<u64, StorageError>;

    /// 批量写入系统属性。
    async fn insert_system_properties(
        &mut self,
        system_id: i64,
        properties: &[Property],
    ) -> Result<u64, StorageError>;

    /// 删除系统的组件关联。
    async fn delete_component_links(&mut self, system_name: &str) -> Result<u64, StorageError>;

    /// 删除系统的全部属性。
    async fn delete_system_properties(&mut self, system_name: &str) -> Result<u64, StorageError>;

    /// 删除系统记录。
    async fn delete_system(&mut self, system_name: &str) -> Result<u64, StorageError>;

    /// 按名称查找系统。
    async fn find_system(&mut self, system_name: &str)
    -> Result<Option<SystemRecord>, StorageError>;

    /// 列出全部组合系统名（升序）。
    async fn list_combo_systems(&mut self) -> Result<Vec<String>, StorageError>;

    /// 提交事务。
    async fn commit(self: Box<Self>) -> Result<(), StorageError>;

    /// 回滚事务。
    async fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}
