//! # Catalog 共有ユーティリティ
//!
//! 音楽カタログサービス全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum などの Web フレームワークには依存しない

pub mod api_response;
pub mod health;
pub mod observability;

pub use api_response::{ApiResponse, ResponseStatus};
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
