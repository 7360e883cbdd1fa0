//! # GET /signed/{key}
//!
//! 取得用署名付きURLの発行。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use kura_types::SignedUrlResponse;

use crate::config::GatewayState;
use crate::error::GatewayError;

/// GET /signed/{key} — 取得用署名付きURL発行。
///
/// キーはパスの1セグメントのみ（`/`を含むキーはこのルートでは
/// 扱えない）。URLの有効期限は固定で、キーの存在確認は行わない。
/// 署名計算はストアクライアントに委ね、Gateway側では行わない。
pub async fn handle_signed_url(
    State(state): State<Arc<GatewayState>>,
    Path(key): Path<String>,
) -> Result<Json<SignedUrlResponse>, GatewayError> {
    let url = state
        .store
        .presign_get(&key, state.presign_expiry_secs)
        .await?;

    Ok(Json(SignedUrlResponse { ok: true, url }))
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
