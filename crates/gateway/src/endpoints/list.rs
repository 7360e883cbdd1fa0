//! # GET /list
//!
//! オブジェクト一覧の1ページをストアから取得して返す。

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use kura_types::{ListQuery, ListResponse};

use crate::config::GatewayState;
use crate::error::GatewayError;

/// デフォルトのページサイズ
const DEFAULT_PAGE_SIZE: i32 = 50;
/// ページサイズの上限
const MAX_PAGE_SIZE: i32 = 1000;

/// GET /list — オブジェクト一覧。
///
/// `pageSize`は[1, 1000]に丸め、`continuationToken`はストアへ
/// そのまま渡す。並び順はストアが返した順序のままで、Gateway側の
/// 絞り込みやソートは行わない。
pub async fn handle_list(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, GatewayError> {
    let max_keys = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let page = state
        .store
        .list_page(max_keys, query.continuation_token)
        .await?;

    Ok(Json(ListResponse {
        ok: true,
        items: page.items,
        next_continuation_token: page.next_continuation_token,
        is_truncated: page.is_truncated,
    }))
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
