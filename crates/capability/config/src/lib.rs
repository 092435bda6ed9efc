//! 应用运行配置加载。

use domain::DatastoreInstance;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

/// 默认数据库账号。
pub const DEFAULT_DB_ACCOUNT: &str = "POCONTROLS_MOD";
/// 默认凭据目录。
pub const DEFAULT_SECRET_DIR: &str = "/user/pclhc/etc/program_manager/private/";
/// 设备选择列表默认展示的设备类别。
pub const DEFAULT_OPERATIONAL_CLASS: u32 = 63;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 各实例的 Postgres 连接串（不含口令）。
    pub database_urls: BTreeMap<DatastoreInstance, String>,
    pub db_account: String,
    pub secret_dir: PathBuf,
    pub name_file: PathBuf,
    pub property_catalog: PathBuf,
    pub operational_class: u32,
    pub property_manager_url: Option<String>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut database_urls = BTreeMap::new();
        if let Some(url) = read_optional("SPARE_PRO_DATABASE_URL") {
            database_urls.insert(DatastoreInstance::Production, url);
        }
        if let Some(url) = read_optional("SPARE_DEV_DATABASE_URL") {
            database_urls.insert(DatastoreInstance::Development, url);
        }
        if database_urls.is_empty() {
            return Err(ConfigError::Missing(
                "SPARE_PRO_DATABASE_URL or SPARE_DEV_DATABASE_URL".to_string(),
            ));
        }
        let db_account =
            read_optional("SPARE_DB_ACCOUNT").unwrap_or_else(|| DEFAULT_DB_ACCOUNT.to_string());
        let secret_dir = read_optional("SPARE_SECRET_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRET_DIR));
        let name_file = read_required("SPARE_NAME_FILE").map(PathBuf::from)?;
        let property_catalog = read_required("SPARE_PROPERTY_CATALOG").map(PathBuf::from)?;
        let operational_class =
            read_u32_with_default("SPARE_OPERATIONAL_CLASS", DEFAULT_OPERATIONAL_CLASS)?;
        let property_manager_url = read_optional("SPARE_PROPERTY_MANAGER_URL");

        Ok(Self {
            database_urls,
            db_account,
            secret_dir,
            name_file,
            property_catalog,
            operational_class,
            property_manager_url,
        })
    }

    /// 生成系统详情页链接（未配置时返回 None）。
    pub fn system_link(&self, system_id: i64) -> Option<String> {
        self.property_manager_url
            .as_deref()
            .map(|base| format!("{}/details/system?id={}", base.trim_end_matches('/'), system_id))
    }
}

fn read_required(key: &str) -> Result<String, ConfigError> {
    read_optional(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
