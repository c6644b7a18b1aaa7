//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に検出される入力値の不備を表現する。
//!
//! API 層ではこのエラーを 400 Bad Request（`status: "fail"`）に変換し、
//! メッセージをそのままクライアントへ返す。
//!
//! ```rust
//! use catalog_domain::DomainError;
//!
//! fn validate_name(name: &str) -> Result<(), DomainError> {
//!     if name.is_empty() {
//!         return Err(DomainError::Validation("名前は必須です".to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_name("").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落、文字数制限の超過、範囲外の数値など。
    /// メッセージはクライアントに表示される前提で記述する。
    #[error("{0}")]
    Validation(String),
}
