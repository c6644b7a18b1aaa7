//! アルバム管理ユースケース

use std::sync::Arc;

use catalog_domain::album::{Album, AlbumDetail, AlbumFields, AlbumId, AlbumName};
use catalog_infra::repository::{AlbumRepository, SongRepository};

use crate::error::CatalogError;

/// アルバム作成・更新の入力
#[derive(Debug, Clone)]
pub struct AlbumInput {
    pub name: String,
    pub year: i32,
}

impl AlbumInput {
    fn validate(self) -> Result<AlbumFields, CatalogError> {
        Ok(AlbumFields {
            name: AlbumName::new(self.name)?,
            year: self.year,
        })
    }
}

/// アルバム管理ユースケース
pub struct AlbumUseCaseImpl {
    album_repository: Arc<dyn AlbumRepository>,
    song_repository:  Arc<dyn SongRepository>,
}

impl AlbumUseCaseImpl {
    pub fn new(
        album_repository: Arc<dyn AlbumRepository>,
        song_repository: Arc<dyn SongRepository>,
    ) -> Self {
        Self {
            album_repository,
            song_repository,
        }
    }

    /// アルバムを追加し、採番した ID を返す
    pub async fn add_album(&self, input: AlbumInput) -> Result<AlbumId, CatalogError> {
        let fields = input.validate()?;
        let id = AlbumId::generate();

        self.album_repository
            .insert(&id, &fields)
            .await?
            .ok_or_else(|| CatalogError::Invariant("アルバムの追加に失敗しました".to_string()))
    }

    /// アルバム一覧を取得する（名前順）
    pub async fn list_albums(&self) -> Result<Vec<Album>, CatalogError> {
        Ok(self.album_repository.find_all().await?)
    }

    /// アルバムを収録楽曲付きで取得する
    ///
    /// アルバム行と楽曲一覧は別々に問い合わせる。
    pub async fn get_album(&self, id: &AlbumId) -> Result<AlbumDetail, CatalogError> {
        let album = self
            .album_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("アルバムが見つかりません".to_string()))?;

        let songs = self.song_repository.find_by_album(id).await?;

        Ok(AlbumDetail { album, songs })
    }

    /// アルバムの名前と発売年を更新する
    pub async fn edit_album(&self, id: &AlbumId, input: AlbumInput) -> Result<(), CatalogError> {
        let fields = input.validate()?;

        let affected = self.album_repository.update(id, &fields).await?;
        if affected == 0 {
            return Err(CatalogError::NotFound(
                "アルバムの更新に失敗しました。ID が見つかりません".to_string(),
            ));
        }
        Ok(())
    }

    /// アルバムを削除する
    pub async fn delete_album(&self, id: &AlbumId) -> Result<(), CatalogError> {
        let affected = self.album_repository.delete(id).await?;
        if affected == 0 {
            return Err(CatalogError::NotFound(
                "アルバムの削除に失敗しました。ID が見つかりません".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use catalog_domain::song::{Song, SongId};
    use catalog_infra::mock::{MockAlbumRepository, MockSongRepository};
    use pretty_assertions::assert_eq;

    use super::*;

    fn sut_with(albums: MockAlbumRepository, songs: MockSongRepository) -> AlbumUseCaseImpl {
        AlbumUseCaseImpl::new(Arc::new(albums), Arc::new(songs))
    }

    fn input(name: &str, year: i32) -> AlbumInput {
        AlbumInput {
            name: name.to_string(),
            year,
        }
    }

    fn song(id: &str, title: &str, album_id: Option<&AlbumId>) -> Song {
        Song {
            id:        SongId::from_string(id),
            title:     title.to_string(),
            year:      2020,
            genre:     "rock".to_string(),
            performer: "X".to_string(),
            duration:  None,
            album_id:  album_id.cloned(),
        }
    }

    #[tokio::test]
    async fn test_追加したアルバムは楽曲なしで取得できる() {
        let sut = sut_with(MockAlbumRepository::new(), MockSongRepository::new());

        let id = sut.add_album(input("Viva", 2020)).await.unwrap();
        let detail = sut.get_album(&id).await.unwrap();

        assert_eq!(detail.album.id, id);
        assert_eq!(detail.album.name, "Viva");
        assert_eq!(detail.album.year, 2020);
        assert!(detail.songs.is_empty());
    }

    #[tokio::test]
    async fn test_アルバム詳細には所属楽曲のみが含まれる() {
        let songs = MockSongRepository::new();
        let sut = sut_with(MockAlbumRepository::new(), songs.clone());
        let a = sut.add_album(input("A", 2020)).await.unwrap();
        let b = sut.add_album(input("B", 2021)).await.unwrap();
        songs.add_song(song("song-1", "One", Some(&a)));
        songs.add_song(song("song-2", "Two", Some(&b)));
        songs.add_song(song("song-3", "Three", None));

        let detail = sut.get_album(&a).await.unwrap();

        let ids: Vec<&str> = detail.songs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["song-1"]);
    }

    #[tokio::test]
    async fn test_空の名前は追加できない() {
        let albums = MockAlbumRepository::new();
        let sut = sut_with(albums.clone(), MockSongRepository::new());

        let err = sut.add_album(input("  ", 2020)).await.unwrap_err();

        assert!(matches!(err, CatalogError::BadRequest(ref msg) if msg == "アルバム名は必須です"));
        assert!(albums.is_empty());
    }

    #[tokio::test]
    async fn test_insertがidを返さなければinvariant() {
        let sut = sut_with(MockAlbumRepository::with_silent_insert(), MockSongRepository::new());

        let err = sut.add_album(input("Viva", 2020)).await.unwrap_err();

        assert!(matches!(err, CatalogError::Invariant(_)));
    }

    #[tokio::test]
    async fn test_存在しないアルバムの取得はnot_found() {
        let sut = sut_with(MockAlbumRepository::new(), MockSongRepository::new());

        let err = sut
            .get_album(&AlbumId::from_string("missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_更新した値が取得できる() {
        let sut = sut_with(MockAlbumRepository::new(), MockSongRepository::new());
        let id = sut.add_album(input("Old", 1999)).await.unwrap();

        sut.edit_album(&id, input("N", 2020)).await.unwrap();
        let detail = sut.get_album(&id).await.unwrap();

        assert_eq!(detail.album.name, "N");
        assert_eq!(detail.album.year, 2020);
    }

    #[tokio::test]
    async fn test_存在しないアルバムの更新と削除はnot_foundで状態を変えない() {
        let albums = MockAlbumRepository::new();
        let sut = sut_with(albums.clone(), MockSongRepository::new());
        let existing = sut.add_album(input("Viva", 2020)).await.unwrap();
        let missing = AlbumId::from_string("missing");

        let edit_err = sut.edit_album(&missing, input("N", 2020)).await.unwrap_err();
        let delete_err = sut.delete_album(&missing).await.unwrap_err();

        assert!(matches!(edit_err, CatalogError::NotFound(_)));
        assert!(matches!(delete_err, CatalogError::NotFound(_)));
        assert_eq!(albums.len(), 1);
        assert_eq!(sut.get_album(&existing).await.unwrap().album.name, "Viva");
    }

    #[tokio::test]
    async fn test_削除後の取得はnot_found() {
        let sut = sut_with(MockAlbumRepository::new(), MockSongRepository::new());
        let id = sut.add_album(input("Viva", 2020)).await.unwrap();

        sut.delete_album(&id).await.unwrap();
        let err = sut.get_album(&id).await.unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_一覧は名前順() {
        let sut = sut_with(MockAlbumRepository::new(), MockSongRepository::new());
        for name in ["Zeta", "Alpha"] {
            sut.add_album(input(name, 2000)).await.unwrap();
        }

        let names: Vec<String> = sut
            .list_albums()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[tokio::test]
    async fn test_リポジトリ障害はdatabaseエラーとして伝播する() {
        let sut = sut_with(MockAlbumRepository::unavailable(), MockSongRepository::new());

        let err = sut.list_albums().await.unwrap_err();

        assert!(matches!(err, CatalogError::Database(_)));
    }
}
