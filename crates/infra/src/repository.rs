//! # リポジトリ実装
//!
//! アルバム・楽曲の永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイト境界**: サービス層はトレイト経由でリポジトリを利用し、
//!   テストではインメモリ実装（`mock` モジュール）に差し替える
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **行型の分離**: DB の行型からドメイン型への変換は [`row_mapper`] に集約

pub mod album_repository;
mod row_mapper;
pub mod song_repository;

pub use album_repository::{AlbumRepository, PostgresAlbumRepository};
pub use song_repository::{PostgresSongRepository, SongRepository};
