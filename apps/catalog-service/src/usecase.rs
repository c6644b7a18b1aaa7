//! # ユースケース層
//!
//! アルバム・楽曲のデータサービスを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、検証とエラー判定はユースケースに集約
//! - **影響行数による存在判定**: 更新・削除で影響行数が 0 の場合は NotFound

pub mod album;
pub mod song;

pub use album::{AlbumInput, AlbumUseCaseImpl};
pub use song::{SongInput, SongUseCaseImpl};
