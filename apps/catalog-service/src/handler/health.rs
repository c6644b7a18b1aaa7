//! # ヘルスチェックハンドラ
//!
//! Catalog Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（DB の接続状態を確認）
//!
//! レスポンス型は [`catalog_shared::HealthResponse`] / [`catalog_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use catalog_infra::{InfraError, db};
use catalog_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

/// DB 疎通確認
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), InfraError>;
}

/// PostgreSQL に `SELECT 1` を発行する疎通確認
pub struct PgDatabaseProbe {
    pool:    PgPool,
    timeout: Duration,
}

impl PgDatabaseProbe {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl DatabaseProbe for PgDatabaseProbe {
    async fn ping(&self) -> Result<(), InfraError> {
        db::ping(&self.pool, self.timeout).await
    }
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub database: Arc<dyn DatabaseProbe>,
}

/// Liveness Check エンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// DB に到達できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = match state.database.ping().await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
    };

    let response =
        ReadinessResponse::from_checks(HashMap::from([("database".to_string(), database)]));
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    struct StubProbe {
        healthy: bool,
    }

    #[async_trait]
    impl DatabaseProbe for StubProbe {
        async fn ping(&self) -> Result<(), InfraError> {
            if self.healthy {
                Ok(())
            } else {
                Err(InfraError::timeout(Duration::from_secs(5)))
            }
        }
    }

    fn create_test_app(healthy: bool) -> Router {
        let state = Arc::new(ReadinessState {
            database: Arc::new(StubProbe { healthy }),
        });
        Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .with_state(state)
    }

    async fn send(sut: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = sut
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_checkはhealthyとバージョンを返す() {
        let (status, body) = send(create_test_app(true), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_readiness_db到達可能なら200() {
        let (status, body) = send(create_test_app(true), "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({ "status": "ready", "checks": { "database": "ok" } })
        );
    }

    #[tokio::test]
    async fn test_readiness_db到達不可なら503() {
        let (status, body) = send(create_test_app(false), "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["checks"]["database"], "error");
    }
}
