//! 内存配置库实现
//!
//! 仅用于测试和本地演示。
//!
//! 功能：
//! - 按数据库实例隔离数据
//! - 事务基于快照：`begin` 复制实例数据，`commit` 整体写回，丢弃即回滚
//! - 故障注入：模拟事务中途的数据库错误

use crate::error::StorageError;
use crate::in_memory::database::InMemoryDatabase;
use crate::models::{NewComboSystem, SystemRecord};
use crate::traits::{SpareStore, SpareTransaction};
use domain::{DatastoreInstance, Property, PropertySet};
use spare_credentials::Credential;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 可注入的故障点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPoint {
    InsertSystemProperties,
    CopyComponentLinks,
    DeleteSystem,
}

/// 内存配置库。
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Clone, Default)]
pub struct InMemorySpareStore {
    databases: Arc<RwLock<HashMap<DatastoreInstance, InMemoryDatabase>>>,
    fault: Arc<RwLock<Option<FaultPoint>>>,
}

impl InMemorySpareStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 装载某实例的数据（覆盖已有数据）。
    pub fn with_database(self, instance: DatastoreInstance, database: InMemoryDatabase) -> Self {
        if let Ok(mut map) = self.databases.write() {
            map.insert(instance, database);
        }
        self
    }

    /// 设置故障点；None 清除。
    pub fn set_fault(&self, fault: Option<FaultPoint>) {
        if let Ok(mut slot) = self.fault.write() {
            *slot = fault;
        }
    }

    /// 读取某实例当前已提交的数据。
    pub fn snapshot(&self, instance: DatastoreInstance) -> Option<InMemoryDatabase> {
        self.databases
            .read()
            .ok()
            .and_then(|map| map.get(&instance).cloned())
    }
}

#[async_trait::async_trait]
impl SpareStore for InMemorySpareStore {
    async fn begin(
        &self,
        instance: DatastoreInstance,
        _credential: &Credential,
    ) -> Result<Box<dyn SpareTransaction>, StorageError> {
        let working = self
            .databases
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .get(&instance)
            .cloned()
            .ok_or_else(|| StorageError::new(format!("database {instance} unavailable")))?;
        let fault = *self
            .fault
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(Box::new(InMemoryTransaction {
            instance,
            working,
            fault,
            target: self.databases.clone(),
        }))
    }
}

/// 内存事务（快照）。
pub struct InMemoryTransaction {
    instance: DatastoreInstance,
    working: InMemoryDatabase,
    fault: Option<FaultPoint>,
    target: Arc<RwLock<HashMap<DatastoreInstance, InMemoryDatabase>>>,
}

impl InMemoryTransaction {
    fn check_fault(&self, point: FaultPoint) -> Result<(), StorageError> {
        if self.fault == Some(point) {
            return Err(StorageError::new(format!("injected fault at {point:?}")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl SpareTransaction for InMemoryTransaction {
    async fn system_properties(&mut self, system_name: &str) -> Result<PropertySet, StorageError> {
        Ok(self.working.properties_of(system_name))
    }

    async fn set_system_property(
        &mut self,
        system_name: &str,
        property_name: &str,
        value: &str,
    ) -> Result<u64, StorageError> {
        Ok(self
            .working
            .update_property(system_name, property_name, value))
    }

    async fn insert_combo_system(
        &mut self,
        combo: &NewComboSystem,
    ) -> Result<Option<i64>, StorageError> {
        self.working.insert_combo(combo)
    }

    async fn copy_component_links(
        &mut self,
        from_system: &str,
        to_system_id: i64,
    ) -> Result<u64, StorageError> {
        self.check_fault(FaultPoint::CopyComponentLinks)?;
        Ok(self.working.copy_components(from_system, to_system_id))
    }

    async fn insert_system_properties(
        &mut self,
        system_id: i64,
        properties: &[Property],
    ) -> Result<u64, StorageError> {
        self.check_fault(FaultPoint::InsertSystemProperties)?;
        self.working.insert_properties(system_id, properties)
    }

    async fn delete_component_links(&mut self, system_name: &str) -> Result<u64, StorageError> {
        Ok(self.working.remove_components(system_name))
    }

    async fn delete_system_properties(&mut self, system_name: &str) -> Result<u64, StorageError> {
        Ok(self.working.remove_properties(system_name))
    }

    async fn delete_system(&mut self, system_name: &str) -> Result<u64, StorageError> {
        self.check_fault(FaultPoint::DeleteSystem)?;
        self.working.remove_system(system_name)
    }

    async fn find_system(
        &mut self,
        system_name: &str,
    ) -> Result<Option<SystemRecord>, StorageError> {
        Ok(self.working.system_by_name(system_name).cloned())
    }

    async fn list_combo_systems(&mut self) -> Result<Vec<String>, StorageError> {
        Ok(self.working.combo_names())
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let InMemoryTransaction {
            instance,
            working,
            target,
            ..
        } = *self;
        let mut map = target
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert(instance, working);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        Ok(())
    }
}
