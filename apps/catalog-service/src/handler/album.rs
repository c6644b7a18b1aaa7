//! # アルバムハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /albums` - アルバム追加
//! - `GET /albums` - アルバム一覧
//! - `GET /albums/{id}` - アルバム詳細（収録楽曲付き）
//! - `PUT /albums/{id}` - アルバム更新
//! - `DELETE /albums/{id}` - アルバム削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use catalog_domain::album::{Album, AlbumDetail, AlbumId};
use catalog_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use super::song::SongSummaryDto;
use crate::{
    error::CatalogError,
    usecase::{AlbumInput, AlbumUseCaseImpl},
};

/// アルバム API の共有状態
pub struct AlbumState {
    pub usecase: AlbumUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// アルバム作成・更新リクエスト
#[derive(Debug, Deserialize)]
pub struct AlbumPayload {
    pub name: String,
    pub year: i32,
}

impl From<AlbumPayload> for AlbumInput {
    fn from(payload: AlbumPayload) -> Self {
        Self {
            name: payload.name,
            year: payload.year,
        }
    }
}

/// アルバム作成レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumIdData {
    pub album_id: String,
}

/// アルバム一覧の要素 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AlbumDto {
    pub id:   String,
    pub name: String,
    pub year: i32,
}

impl From<Album> for AlbumDto {
    fn from(album: Album) -> Self {
        Self {
            id:   album.id.into_string(),
            name: album.name,
            year: album.year,
        }
    }
}

/// アルバム一覧レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AlbumsData {
    pub albums: Vec<AlbumDto>,
}

/// アルバム詳細 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AlbumDetailDto {
    pub id:    String,
    pub name:  String,
    pub year:  i32,
    pub songs: Vec<SongSummaryDto>,
}

impl From<AlbumDetail> for AlbumDetailDto {
    fn from(detail: AlbumDetail) -> Self {
        Self {
            id:    detail.album.id.into_string(),
            name:  detail.album.name,
            year:  detail.album.year,
            songs: detail.songs.into_iter().map(SongSummaryDto::from).collect(),
        }
    }
}

/// アルバム詳細レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AlbumData {
    pub album: AlbumDetailDto,
}

// --- ハンドラ ---

/// POST /albums
///
/// ## レスポンス
///
/// - `201 Created`: 採番されたアルバム ID
/// - `400 Bad Request`: ペイロード不正、バリデーションエラー
#[tracing::instrument(skip_all)]
pub async fn create_album(
    State(state): State<Arc<AlbumState>>,
    payload: Result<Json<AlbumPayload>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let Json(req) = payload?;

    let album_id = state.usecase.add_album(req.into()).await?;
    tracing::info!(%album_id, "アルバムを追加しました");

    let response = ApiResponse::success_with_message(
        "アルバムを追加しました",
        AlbumIdData {
            album_id: album_id.into_string(),
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /albums
#[tracing::instrument(skip_all)]
pub async fn list_albums(
    State(state): State<Arc<AlbumState>>,
) -> Result<impl IntoResponse, CatalogError> {
    let albums = state.usecase.list_albums().await?;

    let response = ApiResponse::success(AlbumsData {
        albums: albums.into_iter().map(AlbumDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// GET /albums/{id}
///
/// ## レスポンス
///
/// - `200 OK`: アルバムと収録楽曲（id, title, performer）
/// - `404 Not Found`: アルバムが見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_album(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let detail = state.usecase.get_album(&AlbumId::from_string(id)).await?;

    let response = ApiResponse::success(AlbumData {
        album: detail.into(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /albums/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新成功
/// - `400 Bad Request`: ペイロード不正、バリデーションエラー
/// - `404 Not Found`: アルバムが見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_album(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
    payload: Result<Json<AlbumPayload>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let Json(req) = payload?;

    state
        .usecase
        .edit_album(&AlbumId::from_string(id), req.into())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("アルバムを更新しました"))))
}

/// DELETE /albums/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 削除成功
/// - `404 Not Found`: アルバムが見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_album(
    State(state): State<Arc<AlbumState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    state.usecase.delete_album(&AlbumId::from_string(id)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("アルバムを削除しました"))))
}
