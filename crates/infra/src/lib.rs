//! # カタログ インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールのライフサイクルとマイグレーション
//! - **タイムアウト**: DB 呼び出し単位の制限時間
//! - **リポジトリ実装**: アルバム・楽曲の永続化と検索
//!
//! ## 依存関係
//!
//! ```text
//! catalog-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use catalog_infra::{db, repository::PostgresSongRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/catalog", &Default::default()).await?;
//!     let songs = PostgresSongRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
