//! # Catalog Service ライブラリ
//!
//! アルバム・楽曲カタログのユースケース、ハンドラ、ルーター構築を公開する。
//! バイナリ（`main.rs`）と統合テストの両方から利用する。

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod usecase;

pub use router::{CatalogDependencies, build_router};
