use domain::{ComboNameError, UnknownDatastore};
use spare_credentials::CredentialError;
use spare_directory::DirectoryError;
use spare_storage::StorageError;
use std::collections::BTreeSet;

/// 组合系统操作错误。
#[derive(Debug, thiserror::Error)]
pub enum ComboError {
    #[error("operational and spare devices cannot be the same: {0}")]
    IdentityConflict(String),
    #[error(
        "devices {operational} (class {operational_class}) and {spare} (class {spare_class}) are of different classes"
    )]
    ClassMismatch {
        operational: String,
        spare: String,
        operational_class: u32,
        spare_class: u32,
    },
    #[error(
        "devices {operational} ({operational_gateway}) and {spare} ({spare_gateway}) belong to different gateways"
    )]
    GatewayMismatch {
        operational: String,
        spare: String,
        operational_gateway: String,
        spare_gateway: String,
    },
    #[error(transparent)]
    UnknownDatastore(#[from] UnknownDatastore),
    /// 运行设备与备件的属性集合不一致：属性目录与配置库已失去同步。
    #[error("system properties of operational and spare systems differ: {}", join_names(.difference))]
    PropertySetMismatch { difference: BTreeSet<String> },
    #[error(transparent)]
    InvalidComboName(#[from] ComboNameError),
    #[error("device {0} not found")]
    DeviceNotFound(String),
    #[error("system {0} not found")]
    SystemNotFound(String),
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] StorageError),
    #[error("credential lookup failed: {0}")]
    Credentials(#[from] CredentialError),
    #[error("device directory error: {0}")]
    Directory(DirectoryError),
}

impl From<DirectoryError> for ComboError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(name) => ComboError::DeviceNotFound(name),
            other => ComboError::Directory(other),
        }
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
