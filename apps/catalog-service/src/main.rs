//! # Catalog Service サーバー
//!
//! アルバムと楽曲のカタログを管理する REST API サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CATALOG_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CATALOG_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DB_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `DB_QUERY_TIMEOUT_SECS` | No | DB 呼び出しのタイムアウト秒数（デフォルト: `5`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,catalog=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p catalog-service
//!
//! # 本番環境
//! LOG_FORMAT=json DATABASE_URL=postgres://... cargo run -p catalog-service --release
//! ```
//!
//! ## ライフサイクル
//!
//! 設定読み込み → トレーシング初期化 → 接続プール作成 → マイグレーション →
//! サーバー起動 → シグナル受信でグレースフルシャットダウン → 接続プールを閉じる

use std::sync::Arc;

use anyhow::Context as _;
use catalog_infra::{
    db::{self, PoolSettings},
    repository::{PostgresAlbumRepository, PostgresSongRepository},
};
use catalog_service::{
    CatalogDependencies,
    build_router,
    config::CatalogConfig,
    handler::PgDatabaseProbe,
};
use catalog_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

/// Catalog Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("catalog-service");
    init_tracing(&tracing_config);

    let config = CatalogConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        service = %tracing_config.service_name,
        "Catalog Service サーバーを起動します: {}",
        config.bind_addr()
    );

    let pool = db::create_pool(
        &config.database_url,
        &PoolSettings {
            max_connections: config.max_connections,
            ..PoolSettings::default()
        },
    )
    .await
    .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;

    let app = build_router(CatalogDependencies {
        album_repository: Arc::new(
            PostgresAlbumRepository::new(pool.clone()).with_query_timeout(config.query_timeout),
        ),
        song_repository:  Arc::new(
            PostgresSongRepository::new(pool.clone()).with_query_timeout(config.query_timeout),
        ),
        database_probe:   Arc::new(PgDatabaseProbe::new(pool.clone(), config.query_timeout)),
    });

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("{} へのバインドに失敗しました", config.bind_addr()))?;
    tracing::info!("Catalog Service サーバーが起動しました: {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("サーバーエラー")?;

    db::close_pool(&pool).await;
    tracing::info!("Catalog Service サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。シャットダウンします"),
        () = terminate => tracing::info!("SIGTERM を受信しました。シャットダウンします"),
    }
}
