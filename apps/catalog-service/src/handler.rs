//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、検証とエラー判定はユースケースに委譲

pub mod album;
pub mod health;
pub mod song;

pub use album::{AlbumState, create_album, delete_album, get_album, list_albums, update_album};
pub use health::{
    DatabaseProbe,
    PgDatabaseProbe,
    ReadinessState,
    health_check,
    readiness_check,
};
pub use song::{SongState, create_song, delete_song, get_song, list_songs, update_song};
