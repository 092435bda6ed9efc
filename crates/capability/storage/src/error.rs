//! 存储层错误类型
//!
//! 统一封装配置库错误，同时保留：
//! - 错误类别（唯一约束冲突 / 其他），供上层区分重复创建
//! - 底层驱动错误（`source`）

use std::error::Error;
use std::fmt;

/// 存储错误类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// 唯一约束冲突（如组合系统名已存在）。
    UniqueViolation,
    Other,
}

#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    message: String,
    source: Option<sqlx::Error>,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::Other,
            message: message.into(),
            source: None,
        }
    }

    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self {
            kind: StorageErrorKind::UniqueViolation,
            ..Self::new(message)
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    pub fn is_unique_violation(&self) -> bool {
        self.kind == StorageErrorKind::UniqueViolation
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match err.as_database_error() {
            Some(db) if db.is_unique_violation() => StorageErrorKind::UniqueViolation,
            _ => StorageErrorKind::Other,
        };
        Self {
            kind,
            message: err.to_string(),
            source: Some(err),
        }
    }
}
