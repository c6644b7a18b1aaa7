//! # SongRepository
//!
//! 楽曲の永続化と検索を担当するリポジトリ。
//!
//! ## 検索クエリの組み立て
//!
//! タイトル・歌手の部分一致検索は [`sqlx::QueryBuilder`] でパラメータを
//! バインドして組み立てる。利用者の入力が SQL 文字列に埋め込まれることはない。
//!
//! | 指定 | WHERE 句 |
//! |------|----------|
//! | なし | （なし） |
//! | タイトルのみ / 歌手のみ | 指定された条件（OR 結合） |
//! | 両方 | タイトル条件 AND 歌手条件 |
//!
//! 部分一致は `POSITION(LOWER($n) IN LOWER(col)) > 0` で評価する。
//! `LIKE` を使わないため、入力中の `%` や `_` はワイルドカードにならない。

use std::time::Duration;

use async_trait::async_trait;
use catalog_domain::{
    album::AlbumId,
    song::{FilterCombinator, Song, SongFields, SongFilter, SongId, SongSummary},
};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::row_mapper::{SongRow, SongSummaryRow, map_rows};
use crate::{db, error::InfraError};

/// 楽曲リポジトリトレイト
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// 楽曲を挿入し、永続化された ID を返す
    async fn insert(&self, id: &SongId, fields: &SongFields) -> Result<Option<SongId>, InfraError>;

    /// フィルタ条件に一致する楽曲の要約を取得する
    async fn find_by_filter(&self, filter: &SongFilter) -> Result<Vec<SongSummary>, InfraError>;

    /// ID で楽曲を検索する
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, InfraError>;

    /// アルバムに所属する楽曲の要約を取得する
    async fn find_by_album(&self, album_id: &AlbumId) -> Result<Vec<SongSummary>, InfraError>;

    /// 楽曲の全フィールドを置き換え、影響行数を返す
    async fn update(&self, id: &SongId, fields: &SongFields) -> Result<u64, InfraError>;

    /// 楽曲を削除し、影響行数を返す
    async fn delete(&self, id: &SongId) -> Result<u64, InfraError>;
}

/// 検索クエリを組み立てる
///
/// 条件は指定順（タイトル → 歌手）にバインドされる。
pub(crate) fn build_filter_query(filter: &SongFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, title, performer FROM songs");

    if let Some(combinator) = filter.combinator() {
        let separator = match combinator {
            FilterCombinator::And => " AND ",
            FilterCombinator::Or => " OR ",
        };

        query.push(" WHERE ");
        let mut conditions = query.separated(separator);
        if let Some(title) = filter.title() {
            conditions.push("POSITION(LOWER(");
            conditions.push_bind_unseparated(title.to_string());
            conditions.push_unseparated(") IN LOWER(title)) > 0");
        }
        if let Some(performer) = filter.performer() {
            conditions.push("POSITION(LOWER(");
            conditions.push_bind_unseparated(performer.to_string());
            conditions.push_unseparated(") IN LOWER(performer)) > 0");
        }
    }

    query.push(" ORDER BY title ASC, id ASC");
    query
}

/// PostgreSQL 実装の SongRepository
#[derive(Debug, Clone)]
pub struct PostgresSongRepository {
    pool:          PgPool,
    query_timeout: Duration,
}

impl PostgresSongRepository {
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
impl SongRepository for PostgresSongRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn insert(&self, id: &SongId, fields: &SongFields) -> Result<Option<SongId>, InfraError> {
        let returned = db::with_timeout(
            self.query_timeout,
            sqlx::query_scalar::<_, String>(
                r#"
                INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                "#,
            )
            .bind(id.as_str())
            .bind(fields.title.as_str())
            .bind(fields.year)
            .bind(fields.genre.as_str())
            .bind(fields.performer.as_str())
            .bind(fields.duration.map(|d| d.as_secs()))
            .bind(fields.album_id.as_ref().map(AlbumId::as_str))
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(returned.map(SongId::from_string))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(combinator = ?filter.combinator()))]
    async fn find_by_filter(&self, filter: &SongFilter) -> Result<Vec<SongSummary>, InfraError> {
        let mut query = build_filter_query(filter);
        let rows = db::with_timeout(
            self.query_timeout,
            query
                .build_query_as::<SongSummaryRow>()
                .fetch_all(&self.pool),
        )
        .await?;

        Ok(map_rows(rows))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, InfraError> {
        let row = db::with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, SongRow>(
                r#"
                SELECT id, title, year, genre, performer, duration, album_id
                FROM songs
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .fetch_optional(&self.pool),
        )
        .await?;

        Ok(row.map(Song::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%album_id))]
    async fn find_by_album(&self, album_id: &AlbumId) -> Result<Vec<SongSummary>, InfraError> {
        let rows = db::with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, SongSummaryRow>(
                r#"
                SELECT id, title, performer
                FROM songs
                WHERE album_id = $1
                ORDER BY title ASC, id ASC
                "#,
            )
            .bind(album_id.as_str())
            .fetch_all(&self.pool),
        )
        .await?;

        Ok(map_rows(rows))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: &SongId, fields: &SongFields) -> Result<u64, InfraError> {
        let result = db::with_timeout(
            self.query_timeout,
            sqlx::query(
                r#"
                UPDATE songs
                SET title = $2, year = $3, genre = $4, performer = $5, duration = $6, album_id = $7
                WHERE id = $1
                "#,
            )
            .bind(id.as_str())
            .bind(fields.title.as_str())
            .bind(fields.year)
            .bind(fields.genre.as_str())
            .bind(fields.performer.as_str())
            .bind(fields.duration.map(|d| d.as_secs()))
            .bind(fields.album_id.as_ref().map(AlbumId::as_str))
            .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &SongId) -> Result<u64, InfraError> {
        let result = db::with_timeout(
            self.query_timeout,
            sqlx::query("DELETE FROM songs WHERE id = $1")
                .bind(id.as_str())
                .execute(&self.pool),
        )
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const TITLE_CONDITION: &str = "POSITION(LOWER($1) IN LOWER(title)) > 0";

    fn filter(title: Option<&str>, performer: Option<&str>) -> SongFilter {
        SongFilter::new(title.map(String::from), performer.map(String::from))
    }

    #[test]
    fn test_条件なしはwhere句を持たない() {
        let query = build_filter_query(&SongFilter::all());

        assert_eq!(
            query.sql(),
            "SELECT id, title, performer FROM songs ORDER BY title ASC, id ASC"
        );
    }

    #[test]
    fn test_タイトルのみは単一条件になる() {
        let query = build_filter_query(&filter(Some("hard"), None));

        assert_eq!(
            query.sql(),
            format!(
                "SELECT id, title, performer FROM songs WHERE {TITLE_CONDITION} ORDER BY title ASC, id ASC"
            )
        );
    }

    #[test]
    fn test_歌手のみは歌手列の条件を1番目のパラメータで持つ() {
        let query = build_filter_query(&filter(None, Some("x")));

        assert_eq!(
            query.sql(),
            "SELECT id, title, performer FROM songs \
             WHERE POSITION(LOWER($1) IN LOWER(performer)) > 0 \
             ORDER BY title ASC, id ASC"
        );
    }

    #[test]
    fn test_両方指定はandで結合する() {
        let query = build_filter_query(&filter(Some("hard"), Some("x")));

        assert_eq!(
            query.sql(),
            format!(
                "SELECT id, title, performer FROM songs WHERE {TITLE_CONDITION} \
                 AND POSITION(LOWER($2) IN LOWER(performer)) > 0 ORDER BY title ASC, id ASC"
            )
        );
    }

    #[rstest]
    #[case("'; DROP TABLE songs; --")]
    #[case("100%")]
    #[case("a_b")]
    fn test_入力値はsqlに埋め込まれない(#[case] input: &str) {
        let query = build_filter_query(&filter(Some(input), Some(input)));

        assert!(!query.sql().contains(input), "入力値が SQL に含まれている: {}", query.sql());
    }

    #[test]
    fn test_空文字列の条件は無視される() {
        let query = build_filter_query(&filter(Some(""), Some("")));
        assert!(!query.sql().contains("WHERE"));
    }

    #[test]
    fn test_postgres_song_repositoryはsendかつsync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresSongRepository>();
        assert_send_sync::<Box<dyn SongRepository>>();
    }
}
