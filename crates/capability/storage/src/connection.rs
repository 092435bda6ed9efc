//! 数据库连接管理
//!
//! 提供单连接初始化功能：
//! - connect_single：以给定凭据建立仅含一个连接的 Postgres 连接池
//!
//! 设计原则：
//! - 每次生命周期操作独立连接，操作结束即关闭，不跨调用复用
//! - 连接串中不保存口令，口令来自凭据能力

use crate::error::StorageError;
use spare_credentials::Credential;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;

/// 建立单连接 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串（不含口令）
/// - `credential`：账号与口令，覆盖连接串中的用户信息
///
/// # 返回
/// - `Result<PgPool, StorageError>`：连接池或错误
pub async fn connect_single(
    database_url: &str,
    credential: &Credential,
) -> Result<PgPool, StorageError> {
    let options = PgConnectOptions::from_str(database_url)?
        .username(&credential.account)
        .password(&credential.password);
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .min_connections(0)
        .connect_with(options)
        .await?;
    Ok(pool)
}
