//! # POST /upload
//!
//! multipartフォームで受け取ったファイルをストアへ書き込む。

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use kura_types::UploadResponse;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// multipartのファイルフィールド名
const FILE_FIELD: &str = "file";

/// POST /upload — ファイルアップロード。
///
/// フィールド`file`のファイルを1件受け取り、クライアントが付けた
/// 元のファイル名をキーとしてストアへ書き込む。キーの正規化や
/// 衝突検出は行わず、同名オブジェクトはストア側の規則で上書き
/// される。本文は全量をメモリに確保してからストアへ渡す。
pub async fn handle_upload(
    State(state): State<Arc<GatewayState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, GatewayError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::BadRequest(format!("multipartの解析に失敗: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let key = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::BadRequest("ファイル名がありません".to_string()))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let body = field
            .bytes()
            .await
            .map_err(|e| GatewayError::BadRequest(format!("ファイル本文の読み取りに失敗: {e}")))?;

        tracing::debug!(key = %key, size = body.len(), "アップロードを受信");

        state.store.put_object(&key, &content_type, body).await?;

        return Ok(Json(UploadResponse { ok: true, key }));
    }

    Err(GatewayError::BadRequest(
        "ファイルがアップロードされていません".to_string(),
    ))
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
