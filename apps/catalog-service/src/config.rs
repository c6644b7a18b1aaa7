//! # Catalog Service 設定
//!
//! 環境変数から Catalog Service サーバーの設定を読み込む。

use std::{env, time::Duration};

use anyhow::Context as _;

/// Catalog Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// バインドアドレス
    pub host:            String,
    /// ポート番号
    pub port:            u16,
    /// データベース接続 URL
    pub database_url:    String,
    /// 接続プールの最大接続数
    pub max_connections: u32,
    /// DB 呼び出し 1 回あたりのタイムアウト
    pub query_timeout:   Duration,
}

impl CatalogConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー検索関数から設定を読み込む
    ///
    /// テストでプロセスの環境変数を書き換えずに済むよう分離している。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("CATALOG_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "CATALOG_PORT", 5000)?;
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL が設定されていません")?;
        let max_connections = parse_nonzero_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        let query_timeout_secs: u64 = parse_nonzero_or(&lookup, "DB_QUERY_TIMEOUT_SECS", 5)?;

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            query_timeout: Duration::from_secs(query_timeout_secs),
        })
    }

    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} の値が不正です: {raw:?}")),
        None => Ok(default),
    }
}

/// 0 を許さない数値設定を読み込む
fn parse_nonzero_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: std::str::FromStr + PartialEq + From<u8>,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse_or(lookup, key, default)?;
    anyhow::ensure!(value != T::from(0), "{key} には 1 以上を指定してください");
    Ok(value)
}
