//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式
//! `{ "status": "success" | "fail" | "error", "message"?: ..., "data"?: T }` を提供する。
//!
//! | status | 用途 |
//! |--------|------|
//! | `success` | 正常終了（2xx） |
//! | `fail` | クライアント起因のエラー（4xx） |
//! | `error` | サーバー起因のエラー（5xx） |

use serde::{Deserialize, Serialize};

/// レスポンスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

/// 公開 API の統一レスポンス型
///
/// `message` と `data` は値がある場合のみシリアライズされる。
/// データを持たないレスポンスは型パラメータを省略して `ApiResponse` と書ける。
///
/// ## 使用例
///
/// ```
/// use catalog_shared::{ApiResponse, ResponseStatus};
///
/// let response = ApiResponse::success("hello");
/// assert_eq!(response.status, ResponseStatus::Success);
/// assert_eq!(response.data, Some("hello"));
///
/// let failure = ApiResponse::fail("アルバムが見つかりません");
/// assert_eq!(failure.status, ResponseStatus::Fail);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T = ()> {
    pub status:  ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data:    Option<T>,
}

impl<T> ApiResponse<T> {
    /// データのみを持つ成功レスポンス
    pub fn success(data: T) -> Self {
        Self {
            status:  ResponseStatus::Success,
            message: None,
            data:    Some(data),
        }
    }

    /// メッセージとデータを持つ成功レスポンス
    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status:  ResponseStatus::Success,
            message: Some(message.into()),
            data:    Some(data),
        }
    }
}

impl ApiResponse {
    /// メッセージのみを持つ成功レスポンス（更新・削除など）
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status:  ResponseStatus::Success,
            message: Some(message.into()),
            data:    None,
        }
    }

    /// クライアントエラー（4xx）
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status:  ResponseStatus::Fail,
            message: Some(message.into()),
            data:    None,
        }
    }

    /// サーバーエラー（5xx）
    ///
    /// メッセージは呼び出し元で固定文言を渡すこと（内部情報を漏らさない）。
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status:  ResponseStatus::Error,
            message: Some(message.into()),
            data:    None,
        }
    }
}
