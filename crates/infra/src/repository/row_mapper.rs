//! # 行マッパー
//!
//! DB の行型からドメインの読み取りモデルへの射影。
//!
//! 行型は SELECT 句と 1 対 1 に対応し、ドメイン型への変換は
//! フィールドを明示的に列挙して行う。テーブルに列が追加されても
//! レスポンスには漏れない。

use catalog_domain::{
    album::{Album, AlbumId},
    song::{Song, SongId, SongSummary},
};

/// `albums` テーブルの行
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct AlbumRow {
    pub id:   String,
    pub name: String,
    pub year: i32,
}

impl From<AlbumRow> for Album {
    fn from(row: AlbumRow) -> Self {
        Self {
            id:   AlbumId::from_string(row.id),
            name: row.name,
            year: row.year,
        }
    }
}

/// `songs` テーブルの全列
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SongRow {
    pub id:        String,
    pub title:     String,
    pub year:      i32,
    pub genre:     String,
    pub performer: String,
    pub duration:  Option<i32>,
    pub album_id:  Option<String>,
}

impl From<SongRow> for Song {
    fn from(row: SongRow) -> Self {
        Self {
            id:        SongId::from_string(row.id),
            title:     row.title,
            year:      row.year,
            genre:     row.genre,
            performer: row.performer,
            duration:  row.duration,
            album_id:  row.album_id.map(AlbumId::from_string),
        }
    }
}

/// 一覧用の `songs` 射影（id, title, performer）
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct SongSummaryRow {
    pub id:        String,
    pub title:     String,
    pub performer: String,
}

impl From<SongSummaryRow> for SongSummary {
    fn from(row: SongSummaryRow) -> Self {
        Self {
            id:        SongId::from_string(row.id),
            title:     row.title,
            performer: row.performer,
        }
    }
}

/// 行の列をまとめて変換する
pub(crate) fn map_rows<R, T: From<R>>(rows: Vec<R>) -> Vec<T> {
    rows.into_iter().map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_song_rowは全フィールドを射影する() {
        let row = SongRow {
            id:        "song-abc".to_string(),
            title:     "Hard".to_string(),
            year:      2020,
            genre:     "rock".to_string(),
            performer: "X".to_string(),
            duration:  None,
            album_id:  Some("album1".to_string()),
        };

        let song = Song::from(row);

        assert_eq!(
            song,
            Song {
                id:        SongId::from_string("song-abc"),
                title:     "Hard".to_string(),
                year:      2020,
                genre:     "rock".to_string(),
                performer: "X".to_string(),
                duration:  None,
                album_id:  Some(AlbumId::from_string("album1")),
            }
        );
    }

    #[test]
    fn test_summary_rowはid_title_performerのみ() {
        let rows = vec![
            SongSummaryRow {
                id:        "song-1".to_string(),
                title:     "A".to_string(),
                performer: "P".to_string(),
            },
            SongSummaryRow {
                id:        "song-2".to_string(),
                title:     "B".to_string(),
                performer: "Q".to_string(),
            },
        ];

        let summaries: Vec<SongSummary> = map_rows(rows);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].id.as_str(), "song-2");
        assert_eq!(summaries[1].performer, "Q");
        assert_eq!(
            serde_json::to_value(&summaries[0]).unwrap(),
            serde_json::json!({ "id": "song-1", "title": "A", "performer": "P" })
        );
    }

    #[test]
    fn test_album_rowの射影() {
        let album = Album::from(AlbumRow {
            id:   "a1".to_string(),
            name: "Viva".to_string(),
            year: 2020,
        });

        assert_eq!(album.id.as_str(), "a1");
        assert_eq!(album.name, "Viva");
        assert_eq!(album.year, 2020);
    }
}
