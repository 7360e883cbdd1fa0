//! # Kura 共有型定義
//!
//! GatewayのHTTP APIで使用するリクエスト/レスポンス型をRust構造体として提供する。
//!
//! ## エンコーディング規則
//! - JSON側のフィールド名はcamelCase（ブラウザクライアント互換）
//! - 省略可能なフィールドは`Option`（未設定時はnullとして送出）

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// アップロード
// ---------------------------------------------------------------------------

/// POST /upload レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub ok: bool,
    /// 書き込みに使用したオブジェクトキー（元のファイル名）
    pub key: String,
}

// ---------------------------------------------------------------------------
// オブジェクト一覧
// ---------------------------------------------------------------------------

/// GET /list クエリパラメータ。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1ページあたりの件数（省略時50、上限1000）
    pub page_size: Option<i32>,
    /// 前ページが返した継続トークン（ストアへそのまま渡す）
    pub continuation_token: Option<String>,
}

/// 一覧ページ内の1オブジェクトの要約。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    /// オブジェクトキー（拡張子を含むフルパス）
    pub key: String,
    /// サイズ（バイト）
    pub size: u64,
    /// 最終更新時刻（ストアが返した値のまま）
    pub last_modified: Option<String>,
}

/// ストアから取得した一覧の1ページ。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    /// オブジェクト要約の列。並び順はストアが返した順序のまま。
    pub items: Vec<ObjectSummary>,
    /// 次ページ取得用の不透明トークン。最終ページではNone。
    pub next_continuation_token: Option<String>,
    /// さらにページが続くかどうか
    pub is_truncated: bool,
}

/// GET /list レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<ObjectSummary>,
    pub next_continuation_token: Option<String>,
    pub is_truncated: bool,
}

// ---------------------------------------------------------------------------
// 一括削除
// ---------------------------------------------------------------------------

/// POST /delete リクエスト。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// 削除対象のキーリスト。空の場合はストアを呼ばずに拒否される。
    #[serde(default)]
    pub keys: Vec<String>,
}

/// 削除に成功したキー。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedKey {
    pub key: String,
}

/// 削除に失敗したキーとストアが報告した理由。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFailure {
    pub key: Option<String>,
    /// ストアのエラーコード（例: "AccessDenied"）
    pub code: Option<String>,
    pub message: Option<String>,
}

/// 削除バッチのキー別結果レポート。
///
/// バッチ呼び出し自体が成功していれば、個別キーの失敗が含まれて
/// いてもHTTPステータスは成功のまま、このレポート内で報告される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteReport {
    pub deleted: Vec<DeletedKey>,
    pub errors: Vec<DeleteFailure>,
}

/// POST /delete レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
    /// ストアが返したキー別結果
    pub resp: DeleteReport,
}

// ---------------------------------------------------------------------------
// 署名付きURL
// ---------------------------------------------------------------------------

/// GET /signed/{key} レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    pub ok: bool,
    /// 期限付きの取得用署名付きURL
    pub url: String,
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// 一覧レスポンスがcamelCaseで直列化され、トークン未設定がnullになることを確認
    #[test]
    fn list_response_serializes_to_camel_case() {
        let resp = ListResponse {
            ok: true,
            items: vec![ObjectSummary {
                key: "docs/a.txt".to_string(),
                size: 3,
                last_modified: Some("2024-01-01T00:00:00Z".to_string()),
            }],
            next_continuation_token: None,
            is_truncated: false,
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["items"][0]["key"], "docs/a.txt");
        assert_eq!(json["items"][0]["lastModified"], "2024-01-01T00:00:00Z");
        assert!(json["nextContinuationToken"].is_null());
        assert_eq!(json["isTruncated"], false);
    }

    /// keys未指定の削除リクエストが空配列として読めることを確認
    #[test]
    fn delete_request_defaults_to_empty_keys() {
        let req: DeleteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.keys.is_empty());

        let req: DeleteRequest = serde_json::from_str(r#"{"keys":["a","b"]}"#).unwrap();
        assert_eq!(req.keys, vec!["a", "b"]);
    }

    /// 一覧クエリのパラメータ名がcamelCaseで対応付くことを確認
    #[test]
    fn list_query_accepts_camel_case_params() {
        let query: ListQuery = serde_json::from_value(serde_json::json!({
            "pageSize": 10,
            "continuationToken": "abc"
        }))
        .unwrap();

        assert_eq!(query.page_size, Some(10));
        assert_eq!(query.continuation_token.as_deref(), Some("abc"));
    }

    /// 削除レポートがdeleted/errorsの両方を往復できることを確認
    #[test]
    fn delete_report_roundtrips() {
        let report = DeleteReport {
            deleted: vec![DeletedKey { key: "a".to_string() }],
            errors: vec![DeleteFailure {
                key: Some("b".to_string()),
                code: Some("AccessDenied".to_string()),
                message: Some("Access Denied".to_string()),
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: DeleteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.deleted[0].key, "a");
        assert_eq!(parsed.errors[0].code.as_deref(), Some("AccessDenied"));
    }
}
