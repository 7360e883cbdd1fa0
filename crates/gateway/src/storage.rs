//! # Object Store 抽象インターフェース
//!
//! S3互換ストアに対する操作の抽象化と、ダウンロード本文の
//! ストリーム表現。

use bytes::Bytes;
use futures::stream::BoxStream;
use kura_types::{DeleteReport, ListingPage};

use crate::error::GatewayError;

pub mod s3;

/// ダウンロード本文のバイトストリーム。
pub type ObjectByteStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// ダウンロード本文。
///
/// ストアクライアントが逐次読み出しに対応していれば`Streamed`、
/// 対応しない場合のみ全量を確保した`Buffered`として返す。
pub enum ObjectBody {
    /// 逐次読み出し可能なストリーム
    Streamed(ObjectByteStream),
    /// 全量バッファ済みの本文
    Buffered(Bytes),
}

/// オブジェクト取得の結果。本文とストアが申告したメタデータ。
pub struct ObjectDownload {
    /// ストアが申告したContent-Type
    pub content_type: Option<String>,
    /// ストアが申告したContent-Length
    pub content_length: Option<u64>,
    /// 本文
    pub body: ObjectBody,
}

/// Object Storeの抽象インターフェース。
///
/// Gateway運用者はS3互換ストレージ（MinIO, AWS S3, Cloudflare R2等）を
/// 実装として選択できる。各操作はストアへの1回の呼び出しに対応し、
/// リトライは行わない。
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// オブジェクトを書き込む。同名キーはストア側の規則で上書きされる。
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), GatewayError>;

    /// オブジェクト一覧を1ページ取得する。
    ///
    /// `continuation_token`はストアへそのまま渡す不透明なカーソル。
    async fn list_page(
        &self,
        max_keys: i32,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, GatewayError>;

    /// 複数キーを1回のバッチ呼び出しで削除し、キー別の結果を返す。
    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteReport, GatewayError>;

    /// オブジェクトを取得する。本文は可能なら逐次ストリームとして返す。
    async fn get_object(&self, key: &str) -> Result<ObjectDownload, GatewayError>;

    /// 取得用署名付きURLを生成する。署名計算はストアクライアント側で行う。
    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError>;
}
