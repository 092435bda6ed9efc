use std::fmt;
use std::str::FromStr;

/// 未知的数据库实例名。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("database instance '{name}' not valid, possible values: pro, dev")]
pub struct UnknownDatastore {
    pub name: String,
}

/// 配置库实例（固定枚举）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatastoreInstance {
    Production,
    Development,
}

impl DatastoreInstance {
    pub const ALL: [DatastoreInstance; 2] =
        [DatastoreInstance::Production, DatastoreInstance::Development];

    /// 实例短名，同时用于凭据文件路径。
    pub fn as_str(&self) -> &'static str {
        match self {
            DatastoreInstance::Production => "pro",
            DatastoreInstance::Development => "dev",
        }
    }

    /// 解析实例名（大小写不敏感，接受短名与全称）。
    pub fn parse(raw: &str) -> Result<Self, UnknownDatastore> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pro" | "production" => Ok(DatastoreInstance::Production),
            "dev" | "development" => Ok(DatastoreInstance::Development),
            _ => Err(UnknownDatastore {
                name: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for DatastoreInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatastoreInstance {
    type Err = UnknownDatastore;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
