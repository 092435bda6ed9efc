//! 组合系统生命周期：创建、启用、停用、删除。
//!
//! 每个操作：
//! - 在独立的事务内完成全部写入，失败即回滚
//! - 运行在带 `operation_id` 的 span 内
//! - 先取凭据再连接配置库，不重试

use crate::access::{DatastoreAccess, finish};
use crate::error::ComboError;
use crate::gate::{ValidatedPair, validate};
use crate::reconcile::fetch_and_reconcile;
use domain::{ComboName, DatastoreInstance, SPARE_ID_PROPERTY, SPARE_ID_RESET};
use spare_directory::{DeviceDirectory, PropertyCatalog};
use spare_storage::{NewComboSystem, SpareTransaction};
use spare_telemetry::{
    new_operation_id, record_activation, record_combo_created, record_combo_deleted,
    record_deactivation, record_properties_skipped,
};
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};

/// 创建结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCombo {
    pub name: ComboName,
    pub system_id: i64,
    pub properties: u64,
    pub components: u64,
    pub skipped: Vec<String>,
}

/// 删除结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedCombo {
    pub name: ComboName,
    pub properties: u64,
    pub components: u64,
}

pub struct ComboLifecycle {
    directory: Arc<dyn DeviceDirectory>,
    catalog: Arc<dyn PropertyCatalog>,
    access: DatastoreAccess,
}

impl ComboLifecycle {
    pub fn new(
        directory: Arc<dyn DeviceDirectory>,
        catalog: Arc<dyn PropertyCatalog>,
        access: DatastoreAccess,
    ) -> Self {
        Self {
            directory,
            catalog,
            access,
        }
    }

    /// 创建组合系统，返回新系统 ID 与写入统计。
    pub async fn create(
        &self,
        operational: &str,
        spare: &str,
        datastore: &str,
    ) -> Result<CreatedCombo, ComboError> {
        let span = info_span!(
            target: "spare.combo",
            "combo_create",
            operation_id = %new_operation_id(),
            operational = %operational,
            spare = %spare,
            datastore = %datastore,
        );
        async move {
            let pair = validate(self.directory.as_ref(), operational, spare, datastore)?;
            let mut tx = self.access.begin(pair.instance).await?;
            let result = self.create_in(tx.as_mut(), &pair).await;
            let created = finish(tx, result).await?;
            record_combo_created();
            record_properties_skipped(created.skipped.len() as u64);
            info!(
                target: "spare.combo",
                combo = %created.name,
                system_id = created.system_id,
                properties = created.properties,
                components = created.components,
                skipped = created.skipped.len(),
                "combo_created"
            );
            Ok(created)
        }
        .instrument(span)
        .await
    }

    async fn create_in(
        &self,
        tx: &mut dyn SpareTransaction,
        pair: &ValidatedPair,
    ) -> Result<CreatedCombo, ComboError> {
        let name = pair.name.clone();
        let operational = pair.operational.name.as_str();
        let spare = pair.spare.name.as_str();

        let reset = tx
            .set_system_property(operational, SPARE_ID_PROPERTY, SPARE_ID_RESET)
            .await?;
        if reset == 0 {
            warn!(target: "spare.combo", system = %operational, "spare_id_not_reset");
        }

        let combo = NewComboSystem {
            name: name.to_string(),
            class_id: i64::from(pair.spare.class_id),
            template_system: spare.to_string(),
        };
        let system_id = tx
            .insert_combo_system(&combo)
            .await?
            .ok_or_else(|| ComboError::SystemNotFound(spare.to_string()))?;

        let components = tx.copy_component_links(spare, system_id).await?;
        let reconciliation =
            fetch_and_reconcile(&mut *tx, self.catalog.as_ref(), operational, spare).await?;
        let properties = tx
            .insert_system_properties(system_id, &reconciliation.properties())
            .await?;

        Ok(CreatedCombo {
            name,
            system_id,
            properties,
            components,
            skipped: reconciliation.skipped,
        })
    }

    /// 启用组合系统：运行设备的 `DEVICE.SPARE_ID` 写为备件通道号。
    pub async fn activate(&self, combo_name: &str, datastore: &str) -> Result<(), ComboError> {
        let span = info_span!(
            target: "spare.combo",
            "combo_activate",
            operation_id = %new_operation_id(),
            combo = %combo_name,
            datastore = %datastore,
        );
        async move {
            let instance = DatastoreInstance::parse(datastore)?;
            let name = ComboName::parse(combo_name)?;
            let mut tx = self.access.begin(instance).await?;
            let result = activate_in(tx.as_mut(), &name).await;
            finish(tx, result).await?;
            record_activation();
            info!(
                target: "spare.combo",
                system = %name.operational(),
                spare_id = %name.spare_id(),
                "combo_activated"
            );
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// 停用组合系统：运行设备的 `DEVICE.SPARE_ID` 复位为 `0`。
    pub async fn deactivate(&self, combo_name: &str, datastore: &str) -> Result<(), ComboError> {
        let span = info_span!(
            target: "spare.combo",
            "combo_deactivate",
            operation_id = %new_operation_id(),
            combo = %combo_name,
            datastore = %datastore,
        );
        async move {
            let instance = DatastoreInstance::parse(datastore)?;
            let name = ComboName::parse(combo_name)?;
            let mut tx = self.access.begin(instance).await?;
            let result = reset_spare_id(tx.as_mut(), name.operational()).await;
            finish(tx, result).await?;
            record_deactivation();
            info!(target: "spare.combo", system = %name.operational(), "combo_deactivated");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// 按当前设备数据重新计算组合名并删除组合系统。
    pub async fn delete(
        &self,
        operational: &str,
        spare: &str,
        datastore: &str,
    ) -> Result<DeletedCombo, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        let spare = self.directory.device(spare)?;
        self.delete_named(ComboName::new(operational, spare.channel)?, instance)
            .await
    }

    /// 按组合名删除组合系统。
    pub async fn delete_by_name(
        &self,
        combo_name: &str,
        datastore: &str,
    ) -> Result<DeletedCombo, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        let name = ComboName::parse(combo_name)?;
        self.delete_named(name, instance).await
    }

    async fn delete_named(
        &self,
        name: ComboName,
        instance: DatastoreInstance,
    ) -> Result<DeletedCombo, ComboError> {
        let span = info_span!(
            target: "spare.combo",
            "combo_delete",
            operation_id = %new_operation_id(),
            combo = %name,
            datastore = %instance,
        );
        async move {
            let mut tx = self.access.begin(instance).await?;
            let result = delete_in(tx.as_mut(), name).await;
            let deleted = finish(tx, result).await?;
            record_combo_deleted();
            info!(
                target: "spare.combo",
                combo = %deleted.name,
                properties = deleted.properties,
                components = deleted.components,
                "combo_deleted"
            );
            Ok(deleted)
        }
        .instrument(span)
        .await
    }
}

async fn activate_in(tx: &mut dyn SpareTransaction, name: &ComboName) -> Result<(), ComboError> {
    let combo = name.to_string();
    if tx.find_system(&combo).await?.is_none() {
        return Err(ComboError::SystemNotFound(combo));
    }
    let updated = tx
        .set_system_property(name.operational(), SPARE_ID_PROPERTY, &name.spare_id())
        .await?;
    if updated == 0 {
        return Err(ComboError::SystemNotFound(name.operational().to_string()));
    }
    Ok(())
}

async fn reset_spare_id(tx: &mut dyn SpareTransaction, system: &str) -> Result<(), ComboError> {
    let updated = tx
        .set_system_property(system, SPARE_ID_PROPERTY, SPARE_ID_RESET)
        .await?;
    if updated == 0 {
        return Err(ComboError::SystemNotFound(system.to_string()));
    }
    Ok(())
}

async fn delete_in(
    tx: &mut dyn SpareTransaction,
    name: ComboName,
) -> Result<DeletedCombo, ComboError> {
    let combo = name.to_string();
    let components = tx.delete_component_links(&combo).await?;
    let properties = tx.delete_system_properties(&combo).await?;
    if tx.delete_system(&combo).await? == 0 {
        return Err(ComboError::SystemNotFound(combo));
    }
    let reset = tx
        .set_system_property(name.operational(), SPARE_ID_PROPERTY, SPARE_ID_RESET)
        .await?;
    if reset == 0 {
        warn!(target: "spare.combo", system = %name.operational(), "spare_id_not_reset");
    }
    Ok(DeletedCombo {
        name,
        properties,
        components,
    })
}
