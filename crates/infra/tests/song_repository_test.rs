//! SongRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/catalog cargo test -p catalog-infra --test song_repository_test
//! ```

use std::time::Duration;

use catalog_domain::{
    album::AlbumId,
    song::{Genre, Performer, SongDuration, SongFields, SongFilter, SongId, SongTitle},
};
use catalog_infra::{
    error::InfraErrorKind,
    repository::{PostgresSongRepository, SongRepository},
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

fn fields(title: &str, performer: &str, album_id: Option<&AlbumId>) -> SongFields {
    SongFields {
        title:     SongTitle::new(title).unwrap(),
        year:      2020,
        genre:     Genre::new("rock").unwrap(),
        performer: Performer::new(performer).unwrap(),
        duration:  Some(SongDuration::new(200).unwrap()),
        album_id:  album_id.cloned(),
    }
}

async fn seed(sut: &PostgresSongRepository) {
    for (title, performer) in [
        ("Hard Times", "Paramore"),
        ("Hardest Button", "The White Stripes"),
        ("Soft", "X Japan"),
        ("Misery Business", "Paramore"),
    ] {
        sut.insert(&SongId::generate(), &fields(title, performer, None))
            .await
            .unwrap();
    }
}

fn titles(summaries: Vec<catalog_domain::song::SongSummary>) -> Vec<String> {
    summaries.into_iter().map(|s| s.title).collect()
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertした楽曲を全フィールド取得できる(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    let album_id = AlbumId::generate();
    let id = SongId::generate();

    let returned = sut
        .insert(&id, &fields("Hard", "X", Some(&album_id)))
        .await
        .unwrap();
    let song = sut.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(returned, Some(id.clone()));
    assert_eq!(song.title, "Hard");
    assert_eq!(song.performer, "X");
    assert_eq!(song.genre, "rock");
    assert_eq!(song.duration, Some(200));
    assert_eq!(song.album_id, Some(album_id));
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_条件なしは全件を返す(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    seed(&sut).await;

    let songs = sut.find_by_filter(&SongFilter::all()).await.unwrap();

    assert_eq!(songs.len(), 4);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_タイトルのみは大文字小文字を無視して部分一致する(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    seed(&sut).await;

    let songs = sut
        .find_by_filter(&SongFilter::new(Some("HARD".to_string()), None))
        .await
        .unwrap();

    assert_eq!(titles(songs), vec!["Hard Times", "Hardest Button"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_両方指定は積集合になる(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    seed(&sut).await;

    let songs = sut
        .find_by_filter(&SongFilter::new(
            Some("hard".to_string()),
            Some("para".to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(titles(songs), vec!["Hard Times"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ワイルドカード文字は文字どおりに扱う(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    seed(&sut).await;

    let songs = sut
        .find_by_filter(&SongFilter::new(Some("%".to_string()), None))
        .await
        .unwrap();

    assert!(songs.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_albumは所属楽曲のみを返す(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    let album_a = AlbumId::generate();
    let album_b = AlbumId::generate();
    sut.insert(&SongId::generate(), &fields("A1", "P", Some(&album_a)))
        .await
        .unwrap();
    sut.insert(&SongId::generate(), &fields("B1", "P", Some(&album_b)))
        .await
        .unwrap();

    let songs = sut.find_by_album(&album_a).await.unwrap();

    assert_eq!(titles(songs), vec!["A1"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_updateは全フィールドを置き換える(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    let id = SongId::generate();
    sut.insert(&id, &fields("Old", "P", None)).await.unwrap();

    let mut new_fields = fields("New", "Q", None);
    new_fields.duration = None;
    let affected = sut.update(&id, &new_fields).await.unwrap();
    let song = sut.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(affected, 1);
    assert_eq!(song.title, "New");
    assert_eq!(song.performer, "Q");
    assert_eq!(song.duration, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しない楽曲の更新と削除は影響行数0(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool);
    let missing = SongId::from_string("song-missing");

    assert_eq!(sut.update(&missing, &fields("T", "P", None)).await.unwrap(), 0);
    assert_eq!(sut.delete(&missing).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_クエリがタイムアウトするとtimeoutエラーになる(pool: PgPool) {
    let sut = PostgresSongRepository::new(pool.clone()).with_query_timeout(Duration::from_millis(50));

    // 他接続でテーブルをロックし、検索を待たせる
    let mut tx = pool.begin().await.unwrap();
    sqlx::query("LOCK TABLE songs IN ACCESS EXCLUSIVE MODE")
        .execute(&mut *tx)
        .await
        .unwrap();

    let err = sut.find_by_filter(&SongFilter::all()).await.unwrap_err();

    assert!(matches!(err.kind(), InfraErrorKind::Timeout(_)));
    tx.rollback().await.unwrap();
}
