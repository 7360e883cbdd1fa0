//! # GET /download/{*key}
//!
//! ストアのオブジェクトをクライアントへストリーム中継する。

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::ObjectBody;

/// Content-Typeが不明な場合のフォールバック
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// GET /download/{*key} — ダウンロード中継。
///
/// キーは残りパス全体（`/`を含むキーに対応）。ストアが申告した
/// Content-Type/Content-Lengthを転記し、Content-Dispositionで
/// ブラウザに保存動作を強制する。ファイル名はキーの最終セグメント。
/// 本文はストアから届いた順に逐次中継し、全量バッファは行わない
/// （ストアクライアントが逐次読み出しに対応しない場合のみ全量を
/// 確保して返す）。ヘッダ送出後のストリームエラーはJSONに変換
/// できないため、接続の切断として伝播する。
pub async fn handle_download(
    State(state): State<Arc<GatewayState>>,
    Path(key): Path<String>,
) -> Result<Response, GatewayError> {
    let object = state.store.get_object(&key).await?;

    let filename = key.rsplit('/').next().unwrap_or(key.as_str());
    let content_type = object
        .content_type
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        );
    if let Some(length) = object.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    let body = match object.body {
        ObjectBody::Streamed(stream) => Body::from_stream(stream),
        ObjectBody::Buffered(bytes) => Body::from(bytes),
    };

    builder
        .body(body)
        .map_err(|e| GatewayError::Internal(format!("レスポンスの構築に失敗: {e}")))
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
