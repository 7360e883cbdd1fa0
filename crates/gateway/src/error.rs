//! # Gateway エラー型

use axum::http::StatusCode;
use axum::Json;

/// Gatewayエラー型。
///
/// 発生源で粗く分類する。クライアント入力の不備は400、
/// それ以外は500として `{error: <文字列>}` 形式で返し、
/// 種別のさらなる分類は行わない。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// ストレージ操作に失敗
    #[error("ストレージ操作に失敗: {0}")]
    Storage(String),
    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),
    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            GatewayError::Storage(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("リクエスト処理に失敗: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
