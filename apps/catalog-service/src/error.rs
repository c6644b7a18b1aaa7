//! # Catalog Service エラー定義
//!
//! サービス層で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | HTTP | `status` | メッセージ |
//! |------------|------|----------|------------|
//! | [`Invariant`](CatalogError::Invariant) | 400 | `fail` | そのまま返す |
//! | [`NotFound`](CatalogError::NotFound) | 404 | `fail` | そのまま返す |
//! | [`BadRequest`](CatalogError::BadRequest) | 400 | `fail` | そのまま返す |
//! | [`Database`](CatalogError::Database) | 500 | `error` | 固定文言（詳細はログのみ） |

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_domain::DomainError;
use catalog_infra::InfraError;
use catalog_shared::ApiResponse;
use thiserror::Error;

/// クライアントに返すサーバーエラーの固定文言
pub const INTERNAL_ERROR_MESSAGE: &str = "サーバーで問題が発生しました";

/// Catalog Service で発生するエラー
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 書き込みが結果を返さなかった（不変条件違反）
    #[error("{0}")]
    Invariant(String),

    /// リソースが見つからない
    #[error("{0}")]
    NotFound(String),

    /// 不正なリクエスト（ペイロードのバリデーションエラー）
    #[error("{0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl CatalogError {
    /// 対応する HTTP ステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Invariant(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for CatalogError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Invariant(msg) | Self::NotFound(msg) | Self::BadRequest(msg) => {
                ApiResponse::fail(msg.clone())
            }
            Self::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                ApiResponse::error(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}
