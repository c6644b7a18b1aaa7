//! 楽曲管理ユースケース

use std::sync::Arc;

use catalog_domain::{
    album::AlbumId,
    song::{
        Genre,
        Performer,
        Song,
        SongDuration,
        SongFields,
        SongFilter,
        SongId,
        SongSummary,
        SongTitle,
    },
};
use catalog_infra::repository::SongRepository;

use crate::error::CatalogError;

/// 楽曲作成・更新の入力
///
/// 更新時も全フィールドを受け取り、既存の値を置き換える。
#[derive(Debug, Clone)]
pub struct SongInput {
    pub title:     String,
    pub year:      i32,
    pub genre:     String,
    pub performer: String,
    pub duration:  Option<i32>,
    pub album_id:  Option<String>,
}

impl SongInput {
    fn validate(self) -> Result<SongFields, CatalogError> {
        Ok(SongFields {
            title:     SongTitle::new(self.title)?,
            year:      self.year,
            genre:     Genre::new(self.genre)?,
            performer: Performer::new(self.performer)?,
            duration:  self.duration.map(SongDuration::new).transpose()?,
            album_id:  self
                .album_id
                .filter(|id| !id.is_empty())
                .map(AlbumId::from_string),
        })
    }
}

/// 楽曲管理ユースケース
pub struct SongUseCaseImpl {
    song_repository: Arc<dyn SongRepository>,
}

impl SongUseCaseImpl {
    pub fn new(song_repository: Arc<dyn SongRepository>) -> Self {
        Self { song_repository }
    }

    /// 楽曲を追加し、採番した ID を返す
    pub async fn add_song(&self, input: SongInput) -> Result<SongId, CatalogError> {
        let fields = input.validate()?;
        let id = SongId::generate();

        self.song_repository
            .insert(&id, &fields)
            .await?
            .ok_or_else(|| CatalogError::Invariant("楽曲の追加に失敗しました".to_string()))
    }

    /// 条件に一致する楽曲の一覧を取得する
    pub async fn list_songs(&self, filter: &SongFilter) -> Result<Vec<SongSummary>, CatalogError> {
        Ok(self.song_repository.find_by_filter(filter).await?)
    }

    /// 楽曲を取得する
    pub async fn get_song(&self, id: &SongId) -> Result<Song, CatalogError> {
        self.song_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("楽曲が見つかりません".to_string()))
    }

    /// 楽曲の全フィールドを更新する
    pub async fn edit_song(&self, id: &SongId, input: SongInput) -> Result<(), CatalogError> {
        let fields = input.validate()?;

        let affected = self.song_repository.update(id, &fields).await?;
        if affected == 0 {
            return Err(CatalogError::NotFound(
                "楽曲の更新に失敗しました。ID が見つかりません".to_string(),
            ));
        }
        Ok(())
    }

    /// 楽曲を削除する
    pub async fn delete_song(&self, id: &SongId) -> Result<(), CatalogError> {
        let affected = self.song_repository.delete(id).await?;
        if affected == 0 {
            return Err(CatalogError::NotFound(
                "楽曲の削除に失敗しました。ID が見つかりません".to_string(),
            ));
        }
        Ok(())
    }
}
