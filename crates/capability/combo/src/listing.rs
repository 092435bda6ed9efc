//! 组合系统目录：列表、解析、组成设备、可用备件。

use crate::access::{DatastoreAccess, finish};
use crate::error::ComboError;
use domain::{ComboName, DatastoreInstance};
use spare_directory::DeviceDirectory;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// 按设备对解析出的组合系统。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCombo {
    pub name: ComboName,
    pub system_id: i64,
}

/// 组合名对应的运行设备与备件（备件可能已不在网关上）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboConstituents {
    pub operational: String,
    pub spare: Option<String>,
}

pub struct ComboDirectory {
    directory: Arc<dyn DeviceDirectory>,
    access: DatastoreAccess,
}

impl ComboDirectory {
    pub fn new(directory: Arc<dyn DeviceDirectory>, access: DatastoreAccess) -> Self {
        Self { directory, access }
    }

    /// 全部组合系统名（升序）。
    pub async fn list_combos(&self, datastore: &str) -> Result<Vec<String>, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        self.combos_in(instance).await
    }

    async fn combos_in(&self, instance: DatastoreInstance) -> Result<Vec<String>, ComboError> {
        let mut tx = self.access.begin(instance).await?;
        let result = tx.list_combo_systems().await.map_err(ComboError::from);
        finish(tx, result).await
    }

    /// 组合名 -> 系统 ID。
    pub async fn resolve(&self, combo_name: &str, datastore: &str) -> Result<i64, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        let name = ComboName::parse(combo_name)?;
        self.system_id(&name, instance).await
    }

    /// 运行设备/备件 -> 组合系统（按当前设备数据重新计算组合名）。
    pub async fn resolve_pair(
        &self,
        operational: &str,
        spare: &str,
        datastore: &str,
    ) -> Result<ResolvedCombo, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        let spare = self.directory.device(spare)?;
        let name = ComboName::new(operational, spare.channel)?;
        let system_id = self.system_id(&name, instance).await?;
        Ok(ResolvedCombo { name, system_id })
    }

    async fn system_id(
        &self,
        name: &ComboName,
        instance: DatastoreInstance,
    ) -> Result<i64, ComboError> {
        let combo = name.to_string();
        let mut tx = self.access.begin(instance).await?;
        let result = match tx.find_system(&combo).await {
            Ok(Some(record)) => Ok(record.system_id),
            Ok(None) => Err(ComboError::SystemNotFound(combo)),
            Err(err) => Err(err.into()),
        };
        finish(tx, result).await
    }

    /// 解析组合名，并在运行设备所在网关上查找对应通道的备件。
    pub fn constituents(&self, combo_name: &str) -> Result<ComboConstituents, ComboError> {
        let name = ComboName::parse(combo_name)?;
        let operational = self.directory.device(name.operational())?;
        let spare = self
            .directory
            .gateway_devices(&operational.gateway)
            .into_iter()
            .find(|device| device.channel == name.channel() && device.name != operational.name)
            .map(|device| device.name);
        Ok(ComboConstituents {
            operational: operational.name,
            spare,
        })
    }

    /// 与运行设备同网关、且通道号出现在现有组合名后缀中的设备（升序）。
    pub async fn spares_available_for(
        &self,
        operational: &str,
        datastore: &str,
    ) -> Result<Vec<String>, ComboError> {
        let instance = DatastoreInstance::parse(datastore)?;
        let device = self.directory.device(operational)?;
        let combos = self.combos_in(instance).await?;
        let channels: BTreeSet<u8> = combos
            .iter()
            .filter_map(|combo| match ComboName::parse(combo) {
                Ok(name) => Some(name.channel()),
                Err(err) => {
                    warn!(target: "spare.combo", combo = %combo, error = %err, "combo_name_skipped");
                    None
                }
            })
            .collect();
        let mut spares: Vec<String> = self
            .directory
            .gateway_devices(&device.gateway)
            .into_iter()
            .filter(|candidate| candidate.name != device.name)
            .filter(|candidate| channels.contains(&candidate.channel))
            .map(|candidate| candidate.name)
            .collect();
        spares.sort();
        Ok(spares)
    }
}
