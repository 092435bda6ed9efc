//! 运行设备/备件配对校验。
//!
//! 纯函数，只读设备目录，不接触配置库。

use crate::error::ComboError;
use domain::{ComboName, DatastoreInstance, DeviceInfo};
use spare_directory::DeviceDirectory;

/// 通过校验的配对。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPair {
    pub operational: DeviceInfo,
    pub spare: DeviceInfo,
    pub instance: DatastoreInstance,
    pub name: ComboName,
}

/// 依次校验：设备不同、类别相同、网关相同、数据库实例合法、组合名可逆。
pub fn validate(
    directory: &dyn DeviceDirectory,
    operational: &str,
    spare: &str,
    datastore: &str,
) -> Result<ValidatedPair, ComboError> {
    if operational == spare {
        return Err(ComboError::IdentityConflict(operational.to_string()));
    }
    let operational = directory.device(operational)?;
    let spare = directory.device(spare)?;
    if operational.class_id != spare.class_id {
        return Err(ComboError::ClassMismatch {
            operational: operational.name,
            spare: spare.name,
            operational_class: operational.class_id,
            spare_class: spare.class_id,
        });
    }
    if operational.gateway != spare.gateway {
        return Err(ComboError::GatewayMismatch {
            operational: operational.name,
            spare: spare.name,
            operational_gateway: operational.gateway,
            spare_gateway: spare.gateway,
        });
    }
    let instance = DatastoreInstance::parse(datastore)?;
    let name = ComboName::for_pair(&operational, &spare)?;
    Ok(ValidatedPair {
        operational,
        spare,
        instance,
        name,
    })
}
