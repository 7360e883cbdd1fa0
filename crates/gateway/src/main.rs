//! # Kura Object Storage Gateway
//!
//! S3互換オブジェクトストアに対するファイル操作を中継する薄いHTTP Gateway。
//! 各エンドポイントはストアへの1回の呼び出しに1対1で対応し、リトライや
//! キャッシュ、リクエスト間の調停は行わない。
//!
//! ## APIエンドポイント
//! - `POST /upload` — ファイルアップロード
//! - `GET /list` — オブジェクト一覧（ページング）
//! - `POST /delete` — 複数オブジェクトの一括削除
//! - `GET /signed/{key}` — 取得用署名付きURL発行
//! - `GET /download/{*key}` — ダウンロード中継（ストリーム）
//!
//! 上記以外のパスはフロントエンド資産の静的配信にフォールバックする。

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::config::{Config, GatewayState};
use crate::storage::s3::S3ObjectStore;

mod config;
mod endpoints;
mod error;
mod storage;
#[cfg(test)]
mod test_support;

/// 署名付きURLの有効期限（秒）
const PRESIGN_EXPIRY_SECS: u32 = 3600;

/// ルーターを構築する。
pub(crate) fn app(state: Arc<GatewayState>) -> Router {
    let static_dir = state.static_dir.clone();
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/upload", post(endpoints::handle_upload))
        .route("/list", get(endpoints::handle_list))
        .route("/delete", post(endpoints::handle_delete))
        .route("/signed/{key}", get(endpoints::handle_signed_url))
        .route("/download/{*key}", get(endpoints::handle_download))
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(
        endpoint = %config.endpoint,
        account_id = %config.account_id,
        bucket = %config.bucket,
        "ストア設定を読み込みました"
    );

    let store = S3ObjectStore::new(&config);
    let state = Arc::new(GatewayState {
        store: Box::new(store),
        presign_expiry_secs: PRESIGN_EXPIRY_SECS,
        max_upload_bytes: config.max_upload_bytes,
        static_dir: config.static_dir.clone(),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
