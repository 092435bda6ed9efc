//! 内存配置库数据
//!
//! 以普通集合模拟 systems / properties / system_properties / component_systems 四张表，
//! 同时提供测试用的造数与断言方法。

use crate::error::StorageError;
use crate::models::{NewComboSystem, SystemRecord};
use domain::{Property, PropertySet};
use std::collections::BTreeMap;

/// 系统属性行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPropertyRow {
    pub system_id: i64,
    pub property_id: i64,
    pub value: Option<String>,
}

/// 组件关联行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLink {
    pub system_id: i64,
    pub component_id: i64,
}

/// 单个实例的内存数据。
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    systems: BTreeMap<i64, SystemRecord>,
    properties: BTreeMap<i64, String>,
    system_properties: Vec<SystemPropertyRow>,
    component_links: Vec<ComponentLink>,
    last_id: i64,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// 登记普通（非组合）系统，返回系统 ID。
    pub fn add_system(&mut self, name: &str, type_id: i64, class_id: i64) -> i64 {
        let system_id = self.allocate_id();
        self.systems.insert(
            system_id,
            SystemRecord {
                system_id,
                name: name.to_string(),
                type_id,
                class_id,
                is_obsolete: false,
                is_spare_combination: false,
            },
        );
        system_id
    }

    /// 直接登记一条组合系统记录（不复制组件与属性）。
    pub fn add_combo_system(&mut self, name: &str, type_id: i64, class_id: i64) -> i64 {
        let system_id = self.add_system(name, type_id, class_id);
        if let Some(system) = self.systems.get_mut(&system_id) {
            system.is_spare_combination = true;
        }
        system_id
    }

    /// 登记属性定义（同名已存在时返回已有 ID）。
    pub fn add_property(&mut self, name: &str) -> i64 {
        if let Some(id) = self.property_id(name) {
            return id;
        }
        let property_id = self.allocate_id();
        self.properties.insert(property_id, name.to_string());
        property_id
    }

    /// 设置系统属性值（不存在则新增）。
    pub fn set_property(&mut self, system_id: i64, property_name: &str, value: &str) {
        self.set_property_value(system_id, property_name, Some(value.to_string()));
    }

    /// 设置系统属性值，`None` 即 NULL。
    pub fn set_property_value(&mut self, system_id: i64, property_name: &str, value: Option<String>) {
        let property_id = self.add_property(property_name);
        match self
            .system_properties
            .iter_mut()
            .find(|row| row.system_id == system_id && row.property_id == property_id)
        {
            Some(row) => row.value = value,
            None => self.system_properties.push(SystemPropertyRow {
                system_id,
                property_id,
                value,
            }),
        }
    }

    /// 登记组件关联。
    pub fn add_component(&mut self, system_id: i64, component_id: i64) {
        self.component_links.push(ComponentLink {
            system_id,
            component_id,
        });
    }

    pub fn system_by_name(&self, name: &str) -> Option<&SystemRecord> {
        self.systems.values().find(|system| system.name == name)
    }

    pub fn property_id(&self, name: &str) -> Option<i64> {
        self.properties
            .iter()
            .find(|(_, property)| property.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// 系统的属性集合（系统不存在时为空）。
    pub fn properties_of(&self, system_name: &str) -> PropertySet {
        let Some(system_id) = self.system_by_name(system_name).map(|s| s.system_id) else {
            return PropertySet::new();
        };
        self.system_properties
            .iter()
            .filter(|row| row.system_id == system_id)
            .filter_map(|row| {
                self.properties.get(&row.property_id).map(|name| {
                    (
                        name.clone(),
                        Property::with_value(row.property_id, name.clone(), row.value.clone()),
                    )
                })
            })
            .collect()
    }

    /// 系统的组件 ID 列表（升序）。
    pub fn components_of(&self, system_id: i64) -> Vec<i64> {
        let mut components: Vec<i64> = self
            .component_links
            .iter()
            .filter(|link| link.system_id == system_id)
            .map(|link| link.component_id)
            .collect();
        components.sort_unstable();
        components
    }

    /// 指向某系统 ID 的属性行数量（用于检查删除后是否残留）。
    pub fn property_rows_for(&self, system_id: i64) -> usize {
        self.system_properties
            .iter()
            .filter(|row| row.system_id == system_id)
            .count()
    }

    pub(crate) fn update_property(
        &mut self,
        system_name: &str,
        property_name: &str,
        value: &str,
    ) -> u64 {
        let (Some(system_id), Some(property_id)) = (
            self.system_by_name(system_name).map(|s| s.system_id),
            self.property_id(property_name),
        ) else {
            return 0;
        };
        let mut updated = 0;
        for row in self
            .system_properties
            .iter_mut()
            .filter(|row| row.system_id == system_id && row.property_id == property_id)
        {
            row.value = Some(value.to_string());
            updated += 1;
        }
        updated
    }

    pub(crate) fn insert_combo(
        &mut self,
        combo: &NewComboSystem,
    ) -> Result<Option<i64>, StorageError> {
        let Some(type_id) = self
            .system_by_name(&combo.template_system)
            .map(|template| template.type_id)
        else {
            return Ok(None);
        };
        if self.system_by_name(&combo.name).is_some() {
            return Err(StorageError::unique_violation(format!(
                "duplicate key value violates unique constraint: system {} exists",
                combo.name
            )));
        }
        let system_id = self.allocate_id();
        self.systems.insert(
            system_id,
            SystemRecord {
                system_id,
                name: combo.name.clone(),
                type_id,
                class_id: combo.class_id,
                is_obsolete: false,
                is_spare_combination: true,
            },
        );
        Ok(Some(system_id))
    }

    pub(crate) fn copy_components(&mut self, from_system: &str, to_system_id: i64) -> u64 {
        let Some(from_id) = self.system_by_name(from_system).map(|s| s.system_id) else {
            return 0;
        };
        let copied: Vec<ComponentLink> = self
            .component_links
            .iter()
            .filter(|link| link.system_id == from_id)
            .map(|link| ComponentLink {
                system_id: to_system_id,
                component_id: link.component_id,
            })
            .collect();
        let count = copied.len() as u64;
        self.component_links.extend(copied);
        count
    }

    pub(crate) fn insert_properties(
        &mut self,
        system_id: i64,
        properties: &[Property],
    ) -> Result<u64, StorageError> {
        if !self.systems.contains_key(&system_id) {
            return Err(StorageError::new(format!(
                "foreign key violation: system {system_id} does not exist"
            )));
        }
        for property in properties {
            if !self.properties.contains_key(&property.id) {
                return Err(StorageError::new(format!(
                    "foreign key violation: property {} does not exist",
                    property.id
                )));
            }
            self.system_properties.push(SystemPropertyRow {
                system_id,
                property_id: property.id,
                value: property.value.clone(),
            });
        }
        Ok(properties.len() as u64)
    }

    pub(crate) fn remove_components(&mut self, system_name: &str) -> u64 {
        let Some(system_id) = self.system_by_name(system_name).map(|s| s.system_id) else {
            return 0;
        };
        let before = self.component_links.len();
        self.component_links.retain(|link| link.system_id != system_id);
        (before - self.component_links.len()) as u64
    }

    pub(crate) fn remove_properties(&mut self, system_name: &str) -> u64 {
        let Some(system_id) = self.system_by_name(system_name).map(|s| s.system_id) else {
            return 0;
        };
        let before = self.system_properties.len();
        self.system_properties.retain(|row| row.system_id != system_id);
        (before - self.system_properties.len()) as u64
    }

    pub(crate) fn remove_system(&mut self, system_name: &str) -> Result<u64, StorageError> {
        let Some(system_id) = self.system_by_name(system_name).map(|s| s.system_id) else {
            return Ok(0);
        };
        let referenced = self.property_rows_for(system_id) > 0
            || self
                .component_links
                .iter()
                .any(|link| link.system_id == system_id);
        if referenced {
            return Err(StorageError::new(format!(
                "foreign key violation: system {system_name} still referenced"
            )));
        }
        self.systems.remove(&system_id);
        Ok(1)
    }

    pub(crate) fn combo_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .systems
            .values()
            .filter(|system| system.is_spare_combination)
            .map(|system| system.name.clone())
            .collect();
        names.sort();
        names
    }
}
