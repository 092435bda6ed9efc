use crate::error::ComboError;
use domain::DatastoreInstance;
use spare_credentials::SecretStore;
use spare_storage::{SpareStore, SpareTransaction};
use std::sync::Arc;

/// 配置库访问：先按实例与账号取凭据，再开启事务。
#[derive(Clone)]
pub struct DatastoreAccess {
    store: Arc<dyn SpareStore>,
    secrets: Arc<dyn SecretStore>,
    account: String,
}

impl DatastoreAccess {
    pub fn new(
        store: Arc<dyn SpareStore>,
        secrets: Arc<dyn SecretStore>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            store,
            secrets,
            account: account.into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub async fn begin(
        &self,
        instance: DatastoreInstance,
    ) -> Result<Box<dyn SpareTransaction>, ComboError> {
        let credential = self.secrets.credential(instance, &self.account)?;
        Ok(self.store.begin(instance, &credential).await?)
    }
}

/// 结束事务：成功则提交，失败则回滚并原样返回错误。
pub(crate) async fn finish<T>(
    tx: Box<dyn SpareTransaction>,
    result: Result<T, ComboError>,
) -> Result<T, ComboError> {
    match result {
        Ok(value) => {
            if let Err(err) = tx.commit().await {
                spare_telemetry::record_persistence_failure();
                return Err(ComboError::PersistenceFailure(err));
            }
            Ok(value)
        }
        Err(err) => {
            if matches!(err, ComboError::PersistenceFailure(_)) {
                spare_telemetry::record_persistence_failure();
            }
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(target: "spare.combo", error = %rollback_err, "rollback_failed");
            }
            Err(err)
        }
    }
}
