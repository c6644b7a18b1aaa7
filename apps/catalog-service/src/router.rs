//! # ルーター構築
//!
//! リポジトリからユースケース・ハンドラ State を組み立て、
//! 全エンドポイントを 1 つの [`Router`] にまとめる。
//!
//! 本番（`main.rs`）では PostgreSQL 実装を、テストではインメモリ実装を渡す。

use std::sync::Arc;

use axum::{Router, routing::get};
use catalog_infra::repository::{AlbumRepository, SongRepository};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        AlbumState,
        DatabaseProbe,
        ReadinessState,
        SongState,
        create_album,
        create_song,
        delete_album,
        delete_song,
        get_album,
        get_song,
        health_check,
        list_albums,
        list_songs,
        readiness_check,
        update_album,
        update_song,
    },
    usecase::{AlbumUseCaseImpl, SongUseCaseImpl},
};

/// ルーターが依存するコンポーネント
#[derive(Clone)]
pub struct CatalogDependencies {
    pub album_repository: Arc<dyn AlbumRepository>,
    pub song_repository:  Arc<dyn SongRepository>,
    pub database_probe:   Arc<dyn DatabaseProbe>,
}

/// 全エンドポイントを持つルーターを構築する
pub fn build_router(deps: CatalogDependencies) -> Router {
    let album_state = Arc::new(AlbumState {
        usecase: AlbumUseCaseImpl::new(
            deps.album_repository.clone(),
            deps.song_repository.clone(),
        ),
    });
    let song_state = Arc::new(SongState {
        usecase: SongUseCaseImpl::new(deps.song_repository),
    });
    let readiness_state = Arc::new(ReadinessState {
        database: deps.database_probe,
    });

    let health_routes = Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state);

    let album_routes = Router::new()
        .route("/albums", get(list_albums).post(create_album))
        .route(
            "/albums/{id}",
            get(get_album).put(update_album).delete(delete_album),
        )
        .with_state(album_state);

    let song_routes = Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route(
            "/songs/{id}",
            get(get_song).put(update_song).delete(delete_song),
        )
        .with_state(song_state);

    Router::new()
        .merge(health_routes)
        .merge(album_routes)
        .merge(song_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
