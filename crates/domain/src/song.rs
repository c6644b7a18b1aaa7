//! # 楽曲
//!
//! 楽曲はタイトル・発売年・ジャンル・歌手・再生時間（任意）を持ち、
//! 任意でアルバムに所属する。
//!
//! ## 読み取りモデル
//!
//! | 型 | 用途 | 含むフィールド |
//! |----|------|----------------|
//! | [`Song`] | 楽曲詳細 | 全フィールド |
//! | [`SongSummary`] | 一覧・アルバム詳細 | id, title, performer |
//!
//! ## 検索フィルタ
//!
//! [`SongFilter`] はタイトル・歌手の部分一致（大文字小文字を区別しない）で
//! 楽曲を絞り込む。両方指定時は AND、片方のみ指定時は OR で条件を結合する。
//! 片方のみの OR では指定されていない側の条件は常に偽となるため、結果は
//! 指定された条件のみで絞り込んだものと一致する。

use serde::{Deserialize, Serialize};

use crate::{DomainError, album::AlbumId};

define_string_id! {
    /// 楽曲の一意識別子
    ///
    /// 他のエンティティの ID と区別できるよう `song-` プレフィックスを持つ。
    pub struct SongId {
        prefix: "song-",
    }
}

define_validated_string! {
    /// 楽曲タイトル（値オブジェクト）
    pub struct SongTitle {
        label: "タイトル",
        max_length: 255,
    }
}

define_validated_string! {
    /// 歌手名（値オブジェクト）
    pub struct Performer {
        label: "歌手",
        max_length: 255,
    }
}

define_validated_string! {
    /// ジャンル（値オブジェクト）
    pub struct Genre {
        label: "ジャンル",
        max_length: 100,
    }
}

// =========================================================================
// SongDuration（再生時間）
// =========================================================================

/// 再生時間（秒）
///
/// # 不変条件
///
/// - 0 以上
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SongDuration(i32);

impl SongDuration {
    pub fn new(seconds: i32) -> Result<Self, DomainError> {
        if seconds < 0 {
            return Err(DomainError::Validation(
                "再生時間は 0 秒以上である必要があります".to_string(),
            ));
        }
        Ok(Self(seconds))
    }

    /// 秒数を取得する
    pub fn as_secs(&self) -> i32 {
        self.0
    }
}

// =========================================================================
// 書き込み・読み取りモデル
// =========================================================================

/// 楽曲の書き込み用フィールド
///
/// 作成・更新の両方で使用する。更新時はすべての可変フィールドを置き換える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongFields {
    pub title:     SongTitle,
    pub year:      i32,
    pub genre:     Genre,
    pub performer: Performer,
    pub duration:  Option<SongDuration>,
    pub album_id:  Option<AlbumId>,
}

/// 楽曲詳細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id:        SongId,
    pub title:     String,
    pub year:      i32,
    pub genre:     String,
    pub performer: String,
    pub duration:  Option<i32>,
    pub album_id:  Option<AlbumId>,
}

/// 楽曲の要約（一覧表示用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSummary {
    pub id:        SongId,
    pub title:     String,
    pub performer: String,
}

impl From<&Song> for SongSummary {
    fn from(song: &Song) -> Self {
        Self {
            id:        song.id.clone(),
            title:     song.title.clone(),
            performer: song.performer.clone(),
        }
    }
}

// =========================================================================
// SongFilter（検索フィルタ）
// =========================================================================

/// フィルタ条件の結合方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCombinator {
    /// いずれかの条件に一致（片方のみ指定時）
    Or,
    /// すべての条件に一致（両方指定時）
    And,
}

/// 楽曲検索フィルタ
///
/// 空文字列は未指定として扱う。
///
/// ```rust
/// use catalog_domain::song::{FilterCombinator, SongFilter};
///
/// let filter = SongFilter::new(Some("hard".to_string()), None);
/// assert_eq!(filter.combinator(), Some(FilterCombinator::Or));
/// assert!(filter.matches("Hard Times", "Paramore"));
/// assert!(!filter.matches("Misery Business", "Paramore"));
///
/// let both = SongFilter::new(Some("hard".to_string()), Some("x".to_string()));
/// assert_eq!(both.combinator(), Some(FilterCombinator::And));
/// assert!(!both.matches("Hard Times", "Paramore"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    title:     Option<String>,
    performer: Option<String>,
}

impl SongFilter {
    pub fn new(title: Option<String>, performer: Option<String>) -> Self {
        Self {
            title:     title.filter(|t| !t.is_empty()),
            performer: performer.filter(|p| !p.is_empty()),
        }
    }

    /// 条件なし（全件）
    pub fn all() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn performer(&self) -> Option<&str> {
        self.performer.as_deref()
    }

    /// 条件の結合方法を返す（条件なしの場合は `None`）
    pub fn combinator(&self) -> Option<FilterCombinator> {
        match (&self.title, &self.performer) {
            (None, None) => None,
            (Some(_), Some(_)) => Some(FilterCombinator::And),
            _ => Some(FilterCombinator::Or),
        }
    }

    /// 楽曲がフィルタ条件に一致するか判定する
    ///
    /// DB 側の検索と同じ規則をメモリ上で評価する。
    pub fn matches(&self, title: &str, performer: &str) -> bool {
        let title_hit = self.title().map(|t| contains_ignore_case(title, t));
        let performer_hit = self.performer().map(|p| contains_ignore_case(performer, p));

        match (title_hit, performer_hit) {
            (None, None) => true,
            (Some(t), Some(p)) => t && p,
            (Some(hit), None) | (None, Some(hit)) => hit,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
