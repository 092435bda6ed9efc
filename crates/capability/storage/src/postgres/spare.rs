//! Postgres 配置库实现
//!
//! 设计要点：
//! - 每次 `begin` 建立独立连接并开启事务，提交或回滚后关闭连接
//! - 使用参数化 SQL 防止注入
//! - 属性批量写入在同一事务内逐行 insert

use crate::connection::connect_single;
use crate::error::StorageError;
use crate::models::{NewComboSystem, SystemRecord};
use crate::traits::{SpareStore, SpareTransaction};
use domain::{DatastoreInstance, Property, PropertySet};
use spare_credentials::Credential;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::collections::BTreeMap;
use tracing::debug;

pub struct PgSpareStore {
    database_urls: BTreeMap<DatastoreInstance, String>,
}

impl PgSpareStore {
    /// # 参数
    /// - `database_urls`：各实例的连接串（不含口令）
    pub fn new(database_urls: BTreeMap<DatastoreInstance, String>) -> Self {
        Self { database_urls }
    }
}

#[async_trait::async_trait]
impl SpareStore for PgSpareStore {
    async fn begin(
        &self,
        instance: DatastoreInstance,
        credential: &Credential,
    ) -> Result<Box<dyn SpareTransaction>, StorageError> {
        let database_url = self.database_urls.get(&instance).ok_or_else(|| {
            StorageError::new(format!("no database url configured for instance {instance}"))
        })?;
        let pool = connect_single(database_url, credential).await?;
        let tx = pool.begin().await?;
        debug!(
            target: "spare.storage",
            instance = %instance,
            account = %credential.account,
            "transaction_begin"
        );
        Ok(Box::new(PgSpareTransaction { tx, pool }))
    }
}

pub struct PgSpareTransaction {
    tx: Transaction<'static, Postgres>,
    pool: PgPool,
}

#[async_trait::async_trait]
impl SpareTransaction for PgSpareTransaction {
    async fn system_properties(&mut self, system_name: &str) -> Result<PropertySet, StorageError> {
        let rows = sqlx::query(
            "select p.pro_name, p.pro_id, sp.spr_value \
             from properties p \
             join system_properties sp on p.pro_id = sp.spr_pro_id \
             join systems s on s.sys_id = sp.spr_sys_id \
             where s.sys_name = $1",
        )
        .bind(system_name)
        .fetch_all(&mut *self.tx)
        .await?;
        let mut properties = PropertySet::new();
        for row in rows {
            let name: String = row.try_get("pro_name")?;
            let value: Option<String> = row.try_get("spr_value")?;
            let property = Property::with_value(row.try_get("pro_id")?, name.clone(), value);
            properties.insert(name, property);
        }
        Ok(properties)
    }

    async fn set_system_property(
        &mut self,
        system_name: &str,
        property_name: &str,
        value: &str,
    ) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "update system_properties sp set spr_value = $1 \
             from systems s, properties p \
             where s.sys_id = sp.spr_sys_id and p.pro_id = sp.spr_pro_id \
             and s.sys_name = $2 and p.pro_name = $3",
        )
        .bind(value)
        .bind(system_name)
        .bind(property_name)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_combo_system(
        &mut self,
        combo: &NewComboSystem,
    ) -> Result<Option<i64>, StorageError> {
        let row = sqlx::query(
            "insert into systems \
             (sys_name, sys_tp_id, sys_class_id, sys_is_obsolete, sys_is_spare_combination) \
             select $1, s.sys_tp_id, $2, false, true from systems s where s.sys_name = $3 \
             returning sys_id",
        )
        .bind(&combo.name)
        .bind(combo.class_id)
        .bind(&combo.template_system)
        .fetch_optional(&mut *self.tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(row.try_get("sys_id")?))
    }

    async fn copy_component_links(
        &mut self,
        from_system: &str,
        to_system_id: i64,
    ) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "insert into component_systems (cs_sys_id, cs_cmp_id) \
             select $1, cs.cs_cmp_id from component_systems cs \
             join systems s on s.sys_id = cs.cs_sys_id \
             join components c on c.cmp_id = cs.cs_cmp_id \
             where s.sys_name = $2",
        )
        .bind(to_system_id)
        .bind(from_system)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_system_properties(
        &mut self,
        system_id: i64,
        properties: &[Property],
    ) -> Result<u64, StorageError> {
        if properties.is_empty() {
            return Ok(0);
        }
        let mut inserted = 0;
        for property in properties {
            let result = sqlx::query(
                "insert into system_properties (spr_sys_id, spr_pro_id, spr_value) \
                 values ($1, $2, $3)",
            )
            .bind(system_id)
            .bind(property.id)
            .bind(&property.value)
            .execute(&mut *self.tx)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    async fn delete_component_links(&mut self, system_name: &str) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "delete from component_systems \
             where cs_sys_id = (select sys_id from systems where sys_name = $1)",
        )
        .bind(system_name)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_system_properties(&mut self, system_name: &str) -> Result<u64, StorageError> {
        let result = sqlx::query(
            "delete from system_properties \
             where spr_sys_id = (select sys_id from systems where sys_name = $1)",
        )
        .bind(system_name)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected())
    }

    async fn delete_system(&mut self, system_name: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("delete from systems where sys_name = $1")
            .bind(system_name)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    async fn find_system(
        &mut self,
        system_name: &str,
    ) -> Result<Option<SystemRecord>, StorageError> {
        let row = sqlx::query(
            "select sys_id, sys_name, sys_tp_id, sys_class_id, sys_is_obsolete, \
             sys_is_spare_combination from systems where sys_name = $1",
        )
        .bind(system_name)
        .fetch_optional(&mut *self.tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(SystemRecord {
            system_id: row.try_get("sys_id")?,
            name: row.try_get("sys_name")?,
            type_id: row.try_get("sys_tp_id")?,
            class_id: row.try_get("sys_class_id")?,
            is_obsolete: row.try_get("sys_is_obsolete")?,
            is_spare_combination: row.try_get("sys_is_spare_combination")?,
        }))
    }

    async fn list_combo_systems(&mut self) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query(
            "select sys_name from systems \
             where sys_is_spare_combination = true order by sys_name collate \"C\" asc",
        )
        .fetch_all(&mut *self.tx)
        .await?;
        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get("sys_name")?);
        }
        Ok(names)
    }

    async fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let PgSpareTransaction { tx, pool } = *self;
        let outcome = tx.commit().await;
        close_after(pool, outcome).await
    }

    async fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        let PgSpareTransaction { tx, pool } = *self;
        let outcome = tx.rollback().await;
        close_after(pool, outcome).await
    }
}

/// 事务结束后关闭连接，无论提交或回滚是否成功。
async fn close_after(pool: PgPool, outcome: Result<(), sqlx::Error>) -> Result<(), StorageError> {
    pool.close().await;
    outcome.map_err(StorageError::from)
}
