//! 命令行共用的装配逻辑：读取配置、加载目录、构建服务。

use spare_combo::{ComboConstituents, ComboDirectory, ComboLifecycle, DatastoreAccess};
use spare_config::{AppConfig, ConfigError};
use spare_credentials::FileSecretStore;
use spare_directory::{DirectoryError, JsonPropertyCatalog, NameFileDirectory};
use spare_storage::PgSpareStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use spare_combo::{ComboError, CreatedCombo, DeletedCombo};

/// 启动失败（配置或外部文件无法加载）。
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// 已装配的服务。
pub struct Services {
    pub config: AppConfig,
    pub directory: Arc<NameFileDirectory>,
    pub lifecycle: ComboLifecycle,
    pub combos: ComboDirectory,
}

impl Services {
    pub fn from_config(config: AppConfig) -> Result<Self, DirectoryError> {
        let directory = Arc::new(NameFileDirectory::load(&config.name_file)?);
        let catalog = Arc::new(JsonPropertyCatalog::load(&config.property_catalog)?);
        // Postgres 配置库 + 文件凭据
        let store = Arc::new(PgSpareStore::new(config.database_urls.clone()));
        let secrets = Arc::new(FileSecretStore::new(config.secret_dir.clone()));
        let access = DatastoreAccess::new(store, secrets, config.db_account.clone());
        info!(
            target: "spare.manager",
            devices = directory.len(),
            instances = config.database_urls.len(),
            account = %config.db_account,
            "services_ready"
        );
        Ok(Self {
            lifecycle: ComboLifecycle::new(directory.clone(), catalog, access.clone()),
            combos: ComboDirectory::new(directory.clone(), access),
            directory,
            config,
        })
    }
}

/// 加载 .env、初始化日志、读取配置并装配服务。
pub fn bootstrap() -> Result<Services, BootstrapError> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    spare_telemetry::init_tracing();
    let config = AppConfig::from_env()?;
    Ok(Services::from_config(config)?)
}

/// 退出前输出计数器快照。
pub fn log_metrics() {
    let snapshot = spare_telemetry::metrics().snapshot();
    debug!(
        target: "spare.manager",
        combos_created = snapshot.combos_created,
        combos_deleted = snapshot.combos_deleted,
        activations = snapshot.activations,
        deactivations = snapshot.deactivations,
        properties_skipped = snapshot.properties_skipped,
        persistence_failures = snapshot.persistence_failures,
        "metrics_snapshot"
    );
}

/// 按组合名删除组合系统。
///
/// 优先按当前设备数据重新计算组合名；运行设备已不在 name 文件中、
/// 或网关上找不到对应通道的备件时，直接按给定组合名删除。
pub async fn delete_combo(
    lifecycle: &ComboLifecycle,
    combos: &ComboDirectory,
    combo: &str,
    database: &str,
) -> Result<DeletedCombo, ComboError> {
    match combos.constituents(combo) {
        Ok(ComboConstituents {
            operational,
            spare: Some(spare),
        }) => lifecycle.delete(&operational, &spare, database).await,
        Ok(_) => lifecycle.delete_by_name(combo, database).await,
        Err(ComboError::DeviceNotFound(device)) => {
            warn!(target: "spare.manager", device = %device, combo = %combo, "constituent_missing");
            lifecycle.delete_by_name(combo, database).await
        }
        Err(err) => Err(err),
    }
}

/// 打印创建结果（含属性管理器链接）。
pub fn print_created(config: &AppConfig, created: &CreatedCombo) {
    println!("created {} (system id {})", created.name, created.system_id);
    for skipped in &created.skipped {
        println!("  skipped property not in catalog: {skipped}");
    }
    if let Some(link) = config.system_link(created.system_id) {
        println!("  {link}");
    }
}

pub fn print_deleted(deleted: &DeletedCombo) {
    println!(
        "deleted {} ({} properties, {} component links)",
        deleted.name, deleted.properties, deleted.components
    );
}
