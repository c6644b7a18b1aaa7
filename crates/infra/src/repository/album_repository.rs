//! # AlbumRepository
//!
//! アルバムの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **影響行数を返す**: 更新・削除は対象が存在しなかったことを
//!   影響行数 0 で呼び出し元に伝え、NotFound への変換はサービス層が行う
//! - **INSERT ... RETURNING**: 挿入が行を返さなかった場合は `None` を返し、
//!   不変条件違反として扱えるようにする
//! - **呼び出し単位のタイムアウト**: すべてのクエリを [`db::with_timeout`] で包む

use std::time::Duration;

use async_trait::async_trait;
use catalog_domain::album::{Album, AlbumFields, AlbumId};
use sqlx::PgPool;

use super::row_mapper::{AlbumRow, map_rows};
use crate::{db, error::InfraError};

/// アルバムリポジトリトレイト
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// アルバムを挿入し、永続化された ID を返す
    async fn insert(&self, id: &AlbumId, fields: &AlbumFields)
    -> Result<Option<AlbumId>, InfraError>;

    /// 全アルバムを名前順で取得する
    async fn find_all(&self) -> Result<Vec<Album>, InfraError>;

    /// ID でアルバムを検索する
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, InfraError>;

    /// アルバムの名前と発売年を置き換え、影響行数を返す
    async fn update(&self, id: &AlbumId, fields: &AlbumFields) -> Result<u64, InfraError>;

    /// アルバムを削除し、影響行数を返す
    ///
    /// 収録楽曲は削除しない（楽曲側の `album_id` はそのまま残る）。
    async fn delete(&self, id: &AlbumId) -> Result<u64, InfraError>;
}

/// PostgreSQL 実装の AlbumRepository
#[derive(Debug, Clone)]
pub struct PostgresAlbumRepository {
    pool:          PgPool,
    query_timeout: Duration,
}

impl PostgresAlbumRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: db::DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// クエリタイムアウトを設定する
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

#[async_trait]
impl AlbumRepository for PostgresAlbumRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn insert(
        &self,
        id: &AlbumId,
        fields: &AlbumFields,
    ) -> Result<Option<AlbumId>, InfraError> {
        let returned = db::with_timeout(
            self.query_timeout,
            sqlx::query_scalar::<_, String>(
                r#"
                INSERT INTO albums (id, name, year)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(id.as_str())
            .bind(fields.name.as_str())
            .bind(fields.year)
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(returned.map(AlbumId::from_string))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Album>, InfraError> {
        let rows = db::with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AlbumRow>(
                r#"
                SELECT id, name, year
                FROM albums
                ORDER BY name ASC, id ASC
                "#,
            )
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(map_rows(rows))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, InfraError> {
        let row = db::with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AlbumRow>(
                r#"
                SELECT id, name, year
                FROM albums
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(Album::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: &AlbumId, fields: &AlbumFields) -> Result<u64, InfraError> {
        let result = db::with_timeout(
            self.query_timeout,
            sqlx::query(
                r#"
                UPDATE albums
                SET name = $2, year = $3
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .bind(fields.name.as_str())
            .bind(fields.year)
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &AlbumId) -> Result<u64, InfraError> {
        let result = db::with_timeout(
            self.query_timeout,
            sqlx::query("DELETE FROM albums WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}
