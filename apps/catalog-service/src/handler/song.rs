//! # 楽曲ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /songs` - 楽曲追加
//! - `GET /songs?title=&performer=` - 楽曲検索（部分一致、大文字小文字を区別しない）
//! - `GET /songs/{id}` - 楽曲詳細
//! - `PUT /songs/{id}` - 楽曲更新（全フィールド置き換え）
//! - `DELETE /songs/{id}` - 楽曲削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use catalog_domain::song::{Song, SongFilter, SongId, SongSummary};
use catalog_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::CatalogError,
    usecase::{SongInput, SongUseCaseImpl},
};

/// 楽曲 API の共有状態
pub struct SongState {
    pub usecase: SongUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 楽曲作成・更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub title:     String,
    pub year:      i32,
    pub genre:     String,
    pub performer: String,
    #[serde(default)]
    pub duration:  Option<i32>,
    #[serde(default)]
    pub album_id:  Option<String>,
}

impl From<SongPayload> for SongInput {
    fn from(payload: SongPayload) -> Self {
        Self {
            title:     payload.title,
            year:      payload.year,
            genre:     payload.genre,
            performer: payload.performer,
            duration:  payload.duration,
            album_id:  payload.album_id,
        }
    }
}

/// 楽曲検索クエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct SongQuery {
    pub title:     Option<String>,
    pub performer: Option<String>,
}

impl From<SongQuery> for SongFilter {
    fn from(query: SongQuery) -> Self {
        SongFilter::new(query.title, query.performer)
    }
}

/// 楽曲作成レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongIdData {
    pub song_id: String,
}

/// 楽曲要約 DTO（一覧・アルバム詳細）
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SongSummaryDto {
    pub id:        String,
    pub title:     String,
    pub performer: String,
}

impl From<SongSummary> for SongSummaryDto {
    fn from(summary: SongSummary) -> Self {
        Self {
            id:        summary.id.into_string(),
            title:     summary.title,
            performer: summary.performer,
        }
    }
}

/// 楽曲一覧レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SongsData {
    pub songs: Vec<SongSummaryDto>,
}

/// 楽曲詳細 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
    pub id:        String,
    pub title:     String,
    pub year:      i32,
    pub performer: String,
    pub genre:     String,
    pub duration:  Option<i32>,
    pub album_id:  Option<String>,
}

impl From<Song> for SongDto {
    fn from(song: Song) -> Self {
        Self {
            id:        song.id.into_string(),
            title:     song.title,
            year:      song.year,
            performer: song.performer,
            genre:     song.genre,
            duration:  song.duration,
            album_id:  song.album_id.map(|id| id.into_string()),
        }
    }
}

/// 楽曲詳細レスポンスの `data`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SongData {
    pub song: SongDto,
}

// --- ハンドラ ---

/// POST /songs
///
/// ## レスポンス
///
/// - `201 Created`: 採番された楽曲 ID
/// - `400 Bad Request`: ペイロード不正、バリデーションエラー
#[tracing::instrument(skip_all)]
pub async fn create_song(
    State(state): State<Arc<SongState>>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let Json(req) = payload?;

    let song_id = state.usecase.add_song(req.into()).await?;
    tracing::info!(%song_id, "楽曲を追加しました");

    let response = ApiResponse::success_with_message(
        "楽曲を追加しました",
        SongIdData {
            song_id: song_id.into_string(),
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /songs
///
/// `title` と `performer` を両方指定すると両方に一致する楽曲、
/// 片方のみ指定するとその条件に一致する楽曲を返す。空文字列は未指定と同じ。
/// クエリ文字列を解釈できない場合は `400 Bad Request`。
#[tracing::instrument(skip_all)]
pub async fn list_songs(
    State(state): State<Arc<SongState>>,
    query: Result<Query<SongQuery>, QueryRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let Query(query) = query?;
    let songs = state.usecase.list_songs(&query.into()).await?;

    let response = ApiResponse::success(SongsData {
        songs: songs.into_iter().map(SongSummaryDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// GET /songs/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_song(
    State(state): State<Arc<SongState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    let song = state.usecase.get_song(&SongId::from_string(id)).await?;

    let response = ApiResponse::success(SongData { song: song.into() });
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /songs/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新成功
/// - `400 Bad Request`: ペイロード不正、バリデーションエラー
/// - `404 Not Found`: 楽曲が見つからない
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_song(
    State(state): State<Arc<SongState>>,
    Path(id): Path<String>,
    payload: Result<Json<SongPayload>, JsonRejection>,
) -> Result<impl IntoResponse, CatalogError> {
    let Json(req) = payload?;

    state
        .usecase
        .edit_song(&SongId::from_string(id), req.into())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("楽曲を更新しました"))))
}

/// DELETE /songs/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_song(
    State(state): State<Arc<SongState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, CatalogError> {
    state.usecase.delete_song(&SongId::from_string(id)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("楽曲を削除しました"))))
}
