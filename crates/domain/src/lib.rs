//! # Catalog ドメイン層
//!
//! 音楽カタログ（アルバムと楽曲）のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **書き込みモデル**: 入力は値オブジェクト（[`album::AlbumName`],
//!   [`song::SongTitle`] など）で受け取り、生成時に検証する
//! - **読み取りモデル**: DB から取り出した値はプレーンな型で保持し、
//!   API 層へそのまま射影できるようにする
//! - **ID 生成**: 不透明な文字列 ID をドメイン層で採番する
//!
//! ## 依存関係の方向
//!
//! ```text
//! catalog-service → infra → domain
//!        ↘                    ↑
//!         ────────────────────┘
//! ```
//!
//! ドメイン層はインフラ層（DB）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`album`] - アルバム
//! - [`song`] - 楽曲と検索フィルタ
//! - [`id`] - ID 採番
//! - [`error`] - ドメインエラー

#[macro_use]
mod macros;

pub mod album;
pub mod error;
pub mod id;
pub mod song;

pub use error::DomainError;
