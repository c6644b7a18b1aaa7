//! AlbumRepository 統合テスト
//!
//! データベースを使用したテスト。sqlx::test マクロを使用して、
//! テストごとに独立したデータベースを作成しマイグレーションを適用する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/catalog cargo test -p catalog-infra --test album_repository_test
//! ```

use catalog_domain::album::{AlbumFields, AlbumId, AlbumName};
use catalog_infra::repository::{AlbumRepository, PostgresAlbumRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

fn fields(name: &str, year: i32) -> AlbumFields {
    AlbumFields {
        name: AlbumName::new(name).unwrap(),
        year,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertした内容をfind_by_idで取得できる(pool: PgPool) {
    let sut = PostgresAlbumRepository::new(pool);
    let id = AlbumId::generate();

    let returned = sut.insert(&id, &fields("Viva", 2020)).await.unwrap();
    let album = sut.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(returned, Some(id.clone()));
    assert_eq!(album.id, id);
    assert_eq!(album.name, "Viva");
    assert_eq!(album.year, 2020);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_allは名前順で返す(pool: PgPool) {
    let sut = PostgresAlbumRepository::new(pool);
    for name in ["Zeta", "Alpha", "Mid"] {
        sut.insert(&AlbumId::generate(), &fields(name, 2000))
            .await
            .unwrap();
    }

    let names: Vec<String> = sut
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.name)
        .collect();

    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_updateは名前と発売年を置き換える(pool: PgPool) {
    let sut = PostgresAlbumRepository::new(pool);
    let id = AlbumId::generate();
    sut.insert(&id, &fields("Old", 1999)).await.unwrap();

    let affected = sut.update(&id, &fields("N", 2020)).await.unwrap();
    let album = sut.find_by_id(&id).await.unwrap().unwrap();

    assert_eq!(affected, 1);
    assert_eq!(album.name, "N");
    assert_eq!(album.year, 2020);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないidの更新と削除は影響行数0(pool: PgPool) {
    let sut = PostgresAlbumRepository::new(pool);
    let missing = AlbumId::from_string("missing");

    assert_eq!(sut.update(&missing, &fields("N", 2020)).await.unwrap(), 0);
    assert_eq!(sut.delete(&missing).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_削除後は見つからない(pool: PgPool) {
    let sut = PostgresAlbumRepository::new(pool);
    let id = AlbumId::generate();
    sut.insert(&id, &fields("Viva", 2020)).await.unwrap();

    assert_eq!(sut.delete(&id).await.unwrap(), 1);
    assert!(sut.find_by_id(&id).await.unwrap().is_none());
}
