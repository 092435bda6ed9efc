//! 凭据能力：按数据库实例与账号解析口令。
//!
//! - `SecretStore`：凭据来源抽象，便于替换实现与测试
//! - `FileSecretStore`：从 `<base>/<实例>/<账号>` 文件读取口令（小写路径，去除尾部空白）
//! - `StaticSecretStore`：内存凭据表（用于测试和本地演示）

use domain::DatastoreInstance;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// 凭据读取错误。
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("secret file {path} unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("secret file {path} is empty")]
    Empty { path: PathBuf },
    #[error("no secret for account {account} on database {instance}")]
    Missing {
        instance: DatastoreInstance,
        account: String,
    },
}

/// 数据库登录凭据。
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub account: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("account", &self.account)
            .field("password", &"***")
            .finish()
    }
}

/// 凭据来源。
pub trait SecretStore: Send + Sync {
    fn credential(
        &self,
        instance: DatastoreInstance,
        account: &str,
    ) -> Result<Credential, CredentialError>;
}

/// 基于文件目录的凭据来源。
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    base_dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 口令文件路径：`<base>/<实例小写>/<账号小写>`。
    pub fn secret_path(&self, instance: DatastoreInstance, account: &str) -> PathBuf {
        self.base_dir
            .join(instance.as_str().to_lowercase())
            .join(account.to_lowercase())
    }
}

impl SecretStore for FileSecretStore {
    fn credential(
        &self,
        instance: DatastoreInstance,
        account: &str,
    ) -> Result<Credential, CredentialError> {
        let path = self.secret_path(instance, account);
        let password = read_secret(&path)?;
        Ok(Credential {
            account: account.to_string(),
            password,
        })
    }
}

fn read_secret(path: &Path) -> Result<String, CredentialError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let secret = raw.trim_end();
    if secret.is_empty() {
        return Err(CredentialError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(secret.to_string())
}

/// 内存凭据表。
#[derive(Debug, Clone, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<(DatastoreInstance, String), String>,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一条凭据（账号大小写不敏感）。
    pub fn with_secret(
        mut self,
        instance: DatastoreInstance,
        account: &str,
        password: impl Into<String>,
    ) -> Self {
        self.secrets
            .insert((instance, account.to_lowercase()), password.into());
        self
    }
}

impl SecretStore for StaticSecretStore {
    fn credential(
        &self,
        instance: DatastoreInstance,
        account: &str,
    ) -> Result<Credential, CredentialError> {
        self.secrets
            .get(&(instance, account.to_lowercase()))
            .map(|password| Credential {
                account: account.to_string(),
                password: password.clone(),
            })
            .ok_or_else(|| CredentialError::Missing {
                instance,
                account: account.to_string(),
            })
    }
}
