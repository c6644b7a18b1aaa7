//! # アルバム
//!
//! アルバムは名前と発売年を持ち、0 曲以上の楽曲から参照される。
//! 楽曲側が `album_id` で逆参照する弱い関連であり、アルバムは楽曲の
//! 存在を保証しない。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use catalog_domain::album::{AlbumFields, AlbumId, AlbumName};
//!
//! let fields = AlbumFields {
//!     name: AlbumName::new("Viva")?,
//!     year: 2020,
//! };
//! let id = AlbumId::generate();
//!
//! assert_eq!(fields.name.as_str(), "Viva");
//! assert!(!id.as_str().is_empty());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::song::SongSummary;

define_string_id! {
    /// アルバムの一意識別子
    ///
    /// 採番時に一度だけ割り当てられ、以後変更されない。
    pub struct AlbumId {
        prefix: "",
    }
}

define_validated_string! {
    /// アルバム名（値オブジェクト）
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない（前後の空白はトリム）
    /// - 最大 255 文字
    pub struct AlbumName {
        label: "アルバム名",
        max_length: 255,
    }
}

/// アルバムの書き込み用フィールド
///
/// 作成・更新の両方で使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumFields {
    pub name: AlbumName,
    pub year: i32,
}

/// 永続化されたアルバム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id:   AlbumId,
    pub name: String,
    pub year: i32,
}

/// アルバム詳細（収録楽曲付き）
///
/// アルバム行と楽曲一覧は別々のクエリで取得するため、同一スナップショット
/// であることは保証しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDetail {
    pub album: Album,
    pub songs: Vec<SongSummary>,
}
