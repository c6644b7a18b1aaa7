/// 不透明な文字列 ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`String` をラップ、serde では素の文字列として扱う）
/// - `generate()`: プレフィックス + ランダムな英数字列で新しい ID を採番
/// - `from_string()`: 既存の文字列から復元（パスパラメータや DB の値）
/// - `as_str()` / `into_string()`
///
/// # 使用例
///
/// ```rust
/// use catalog_domain::song::SongId;
///
/// let id = SongId::generate();
/// assert!(id.as_str().starts_with("song-"));
///
/// let restored = SongId::from_string(id.as_str());
/// assert_eq!(id, restored);
/// ```
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            prefix: $prefix:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(String);

        impl $Name {
            /// 採番時に付与するプレフィックス
            pub const PREFIX: &'static str = $prefix;

            /// 新しい ID を採番する
            pub fn generate() -> Self {
                Self(format!("{}{}", Self::PREFIX, $crate::id::random_suffix()))
            }

            /// 既存の文字列から ID を作成する
            ///
            /// 形式は検証しない（存在しない ID は問い合わせ結果で判明する）。
            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 所有権を持つ文字列に変換する
            pub fn into_string(self) -> String {
                self.0
            }
        }
    };
}

/// バリデーション付き String Newtype を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`String` をラップ）
/// - `new()`: trim + 空チェック + 最大長チェック
/// - `as_str()` / `into_string()` / `Display`
///
/// # 引数
///
/// - `$label`: エラーメッセージに使うラベル（例: `"アルバム名"`）
/// - `$max_length`: 最大文字数（`chars().count()` でカウント）
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use catalog_domain::album::AlbumName;
///
/// let name = AlbumName::new("  Viva la Vida ")?;
/// assert_eq!(name.as_str(), "Viva la Vida");
/// assert!(AlbumName::new("   ").is_err());
/// # Ok(())
/// # }
/// ```
macro_rules! define_validated_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            label: $label:expr,
            max_length: $max_length:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        $vis struct $Name(String);

        impl $Name {
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into().trim().to_string();

                if value.is_empty() {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は必須です",
                        $label
                    )));
                }

                if value.chars().count() > $max_length {
                    return Err($crate::DomainError::Validation(format!(
                        "{}は {} 文字以内である必要があります",
                        $label, $max_length
                    )));
                }

                Ok(Self(value))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 所有権を持つ文字列に変換する
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
