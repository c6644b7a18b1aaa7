//! # テスト用モックリポジトリ
//!
//! サービス層・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! catalog-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 検索・並び順は PostgreSQL 実装と同じ規則（[`SongFilter::matches`]、
//! タイトル順）に従う。ただし並び順はバイト順の比較であり、DB の照合順序とは
//! 大文字小文字が混在すると一致しない。順序を検証するテストのデータは大文字小文字を揃えること。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_domain::{
    album::{Album, AlbumFields, AlbumId},
    song::{Song, SongFields, SongFilter, SongId, SongSummary},
};

use crate::{
    error::InfraError,
    repository::{AlbumRepository, SongRepository},
};

/// モックの振る舞い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Behavior {
    #[default]
    Normal,
    /// INSERT が行を返さない
    SilentInsert,
    /// すべての呼び出しが失敗する
    Unavailable,
}

impl Behavior {
    fn check(self) -> Result<(), InfraError> {
        match self {
            Self::Unavailable => Err(InfraError::unexpected("モックリポジトリは利用不可に設定されています")),
            _ => Ok(()),
        }
    }
}

// ===== MockAlbumRepository =====

#[derive(Clone, Default)]
pub struct MockAlbumRepository {
    albums:   Arc<Mutex<Vec<Album>>>,
    behavior: Behavior,
}

impl MockAlbumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// INSERT が ID を返さないモックを作成する
    pub fn with_silent_insert() -> Self {
        Self {
            behavior: Behavior::SilentInsert,
            ..Self::default()
        }
    }

    /// すべての呼び出しが失敗するモックを作成する
    pub fn unavailable() -> Self {
        Self {
            behavior: Behavior::Unavailable,
            ..Self::default()
        }
    }

    pub fn add_album(&self, album: Album) {
        self.albums.lock().unwrap().push(album);
    }

    /// 保存済みのアルバム数
    pub fn len(&self) -> usize {
        self.albums.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AlbumRepository for MockAlbumRepository {
    async fn insert(
        &self,
        id: &AlbumId,
        fields: &AlbumFields,
    ) -> Result<Option<AlbumId>, InfraError> {
        self.behavior.check()?;
        if self.behavior == Behavior::SilentInsert {
            return Ok(None);
        }

        self.albums.lock().unwrap().push(Album {
            id:   id.clone(),
            name: fields.name.as_str().to_string(),
            year: fields.year,
        });
        Ok(Some(id.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Album>, InfraError> {
        self.behavior.check()?;
        let mut albums = self.albums.lock().unwrap().clone();
        // バイト順（DB の照合順序ではない）
        albums.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        Ok(albums)
    }

    async fn find_by_id(&self, id: &AlbumId) -> Result<Option<Album>, InfraError> {
        self.behavior.check()?;
        Ok(self
            .albums
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == id)
            .cloned())
    }

    async fn update(&self, id: &AlbumId, fields: &AlbumFields) -> Result<u64, InfraError> {
        self.behavior.check()?;
        let mut albums = self.albums.lock().unwrap();
        match albums.iter_mut().find(|a| &a.id == id) {
            Some(album) => {
                album.name = fields.name.as_str().to_string();
                album.year = fields.year;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &AlbumId) -> Result<u64, InfraError> {
        self.behavior.check()?;
        let mut albums = self.albums.lock().unwrap();
        let before = albums.len();
        albums.retain(|a| &a.id != id);
        Ok((before - albums.len()) as u64)
    }
}

// ===== MockSongRepository =====

#[derive(Clone, Default)]
pub struct MockSongRepository {
    songs:    Arc<Mutex<Vec<Song>>>,
    behavior: Behavior,
}

impl MockSongRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// INSERT が ID を返さないモックを作成する
    pub fn with_silent_insert() -> Self {
        Self {
            behavior: Behavior::SilentInsert,
            ..Self::default()
        }
    }

    /// すべての呼び出しが失敗するモックを作成する
    pub fn unavailable() -> Self {
        Self {
            behavior: Behavior::Unavailable,
            ..Self::default()
        }
    }

    pub fn add_song(&self, song: Song) {
        self.songs.lock().unwrap().push(song);
    }

    /// 保存済みの楽曲数
    pub fn len(&self) -> usize {
        self.songs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn summaries_where(&self, predicate: impl Fn(&Song) -> bool) -> Vec<SongSummary> {
        let songs = self.songs.lock().unwrap();
        let mut matched: Vec<&Song> = songs.iter().filter(|s| predicate(s)).collect();
        // バイト順（DB の照合順序ではない）
        matched.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.as_str().cmp(b.id.as_str())));
        matched.into_iter().map(SongSummary::from).collect()
    }
}

fn to_song(id: &SongId, fields: &SongFields) -> Song {
    Song {
        id:        id.clone(),
        title:     fields.title.as_str().to_string(),
        year:      fields.year,
        genre:     fields.genre.as_str().to_string(),
        performer: fields.performer.as_str().to_string(),
        duration:  fields.duration.map(|d| d.as_secs()),
        album_id:  fields.album_id.clone(),
    }
}

#[async_trait]
impl SongRepository for MockSongRepository {
    async fn insert(&self, id: &SongId, fields: &SongFields) -> Result<Option<SongId>, InfraError> {
        self.behavior.check()?;
        if self.behavior == Behavior::SilentInsert {
            return Ok(None);
        }

        self.songs.lock().unwrap().push(to_song(id, fields));
        Ok(Some(id.clone()))
    }

    async fn find_by_filter(&self, filter: &SongFilter) -> Result<Vec<SongSummary>, InfraError> {
        self.behavior.check()?;
        Ok(self.summaries_where(|s| filter.matches(&s.title, &s.performer)))
    }

    async fn find_by_id(&self, id: &SongId) -> Result<Option<Song>, InfraError> {
        self.behavior.check()?;
        Ok(self
            .songs
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find_by_album(&self, album_id: &AlbumId) -> Result<Vec<SongSummary>, InfraError> {
        self.behavior.check()?;
        Ok(self.summaries_where(|s| s.album_id.as_ref() == Some(album_id)))
    }

    async fn update(&self, id: &SongId, fields: &SongFields) -> Result<u64, InfraError> {
        self.behavior.check()?;
        let mut songs = self.songs.lock().unwrap();
        match songs.iter_mut().find(|s| &s.id == id) {
            Some(song) => {
                *song = to_song(id, fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &SongId) -> Result<u64, InfraError> {
        self.behavior.check()?;
        let mut songs = self.songs.lock().unwrap();
        let before = songs.len();
        songs.retain(|s| &s.id != id);
        Ok((before - songs.len()) as u64)
    }
}
