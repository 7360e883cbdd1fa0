//! # POST /delete
//!
//! 複数オブジェクトの一括削除。

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use kura_types::{DeleteRequest, DeleteResponse};

use crate::config::GatewayState;
use crate::error::GatewayError;

/// POST /delete — オブジェクト一括削除。
///
/// 空のキーリストはストアを呼ばずに400を返す。削除は全キーを
/// 1回のバッチ呼び出しでストアへ送り、キー別の結果レポートを
/// `resp`フィールドとして返す。個別キーの失敗が含まれていても
/// HTTPステータスは成功のままで、解釈は呼び出し側に委ねる。
pub async fn handle_delete(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<DeleteRequest>,
) -> Result<Json<DeleteResponse>, GatewayError> {
    if body.keys.is_empty() {
        return Err(GatewayError::BadRequest(
            "keysは空でない配列である必要があります".to_string(),
        ));
    }

    let report = state.store.delete_objects(&body.keys).await?;

    Ok(Json(DeleteResponse { ok: true, resp: report }))
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
