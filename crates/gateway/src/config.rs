//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。
//! 必須項目が欠けている場合はリスナーを開く前に起動を中止する。

use crate::storage::ObjectStore;

/// デフォルトの待ち受けポート
const DEFAULT_PORT: u16 = 3000;
/// デフォルトの静的ファイル配信ディレクトリ
const DEFAULT_STATIC_DIR: &str = "public";
/// デフォルトのアップロード最大サイズ（バイト）
const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// 設定エラー。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("環境変数 {0} が設定されていません")]
    MissingVar(&'static str),
    /// 値の形式が不正
    #[error("環境変数 {0} の値が不正です: {1}")]
    InvalidVar(&'static str, String),
}

/// Gateway設定。プロセス起動時に環境変数から1度だけ読み込む。
#[derive(Debug, Clone)]
pub struct Config {
    /// ストアのエンドポイントURL
    pub endpoint: String,
    /// アカウント識別子（Cloudflare R2等のS3互換サービスで使用）
    pub account_id: String,
    /// アクセスキー
    pub access_key: String,
    /// シークレットキー
    pub secret_key: String,
    /// バケット名
    pub bucket: String,
    /// リージョン（S3互換ストアでは通常 "auto"）
    pub region: String,
    /// HTTP待ち受けポート
    pub port: u16,
    /// 静的ファイル配信ディレクトリ
    pub static_dir: String,
    /// アップロード最大サイズ（バイト）
    pub max_upload_bytes: usize,
}

impl Config {
    /// 環境変数から設定を読み込む。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む。テストからも使用する。
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| {
            get(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidVar("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match get("GATEWAY_MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidVar("GATEWAY_MAX_UPLOAD_BYTES", e.to_string()))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            endpoint: require("S3_ENDPOINT")?,
            account_id: require("S3_ACCOUNT_ID")?,
            access_key: require("S3_ACCESS_KEY")?,
            secret_key: require("S3_SECRET_KEY")?,
            bucket: require("S3_BUCKET")?,
            region: get("S3_REGION").unwrap_or_else(|| "auto".to_string()),
            port,
            static_dir: get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            max_upload_bytes,
        })
    }
}

/// Gatewayの共有状態。
///
/// ストアクライアントは起動時に1度だけ構築し、全リクエストハンドラ
/// から読み取り専用で共有する。リクエスト間の調停や共有可変状態は
/// 持たない。
pub struct GatewayState {
    /// Object Store（S3互換等、トレイトで抽象化）
    pub store: Box<dyn ObjectStore>,
    /// 署名付きURLの有効期限（秒）
    pub presign_expiry_secs: u32,
    /// アップロード最大サイズ（バイト）
    pub max_upload_bytes: usize,
    /// 静的ファイル配信ディレクトリ
    pub static_dir: String,
}

// ---------------------------------------------------------------------------
// テスト
// ---------------------------------------------------------------------------
