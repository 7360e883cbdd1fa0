//! # S3互換 Object Store 実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する
//! Object Store実装。

use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_smithy_types::date_time::Format;
use aws_smithy_types::error::display::DisplayErrorContext;
use bytes::Bytes;
use futures::StreamExt;
use kura_types::{DeleteFailure, DeleteReport, DeletedKey, ListingPage, ObjectSummary};
use tokio_util::io::ReaderStream;

use super::{ObjectBody, ObjectDownload, ObjectStore};
use crate::config::Config;
use crate::error::GatewayError;

/// S3互換ストレージによるObject Store実装。
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    /// 検証済み設定からクライアントを構築する。
    ///
    /// クライアントはプロセス起動時に1度だけ構築され、以後は
    /// 全リクエストハンドラから読み取り専用で共有される。
    pub fn new(config: &Config) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "kura-env",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint.clone())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), GatewayError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                GatewayError::Storage(format!(
                    "オブジェクトの書き込みに失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }

    async fn list_page(
        &self,
        max_keys: i32,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, GatewayError> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(max_keys)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Storage(format!(
                    "オブジェクト一覧の取得に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let items = resp
            .contents()
            .iter()
            .map(|object| ObjectSummary {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or(0).max(0) as u64,
                last_modified: object
                    .last_modified()
                    .and_then(|t| t.fmt(Format::DateTime).ok()),
            })
            .collect();

        Ok(ListingPage {
            items,
            next_continuation_token: resp.next_continuation_token().map(str::to_string),
            is_truncated: resp.is_truncated().unwrap_or(false),
        })
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteReport, GatewayError> {
        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key.clone()).build())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GatewayError::Internal(format!("削除対象の構築に失敗: {e}")))?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| GatewayError::Internal(format!("削除リクエストの構築に失敗: {e}")))?;

        let resp = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Storage(format!(
                    "オブジェクトの一括削除に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let deleted = resp
            .deleted()
            .iter()
            .filter_map(|entry| {
                entry.key().map(|key| DeletedKey {
                    key: key.to_string(),
                })
            })
            .collect();

        let errors = resp
            .errors()
            .iter()
            .map(|error| DeleteFailure {
                key: error.key().map(str::to_string),
                code: error.code().map(str::to_string),
                message: error.message().map(str::to_string),
            })
            .collect();

        Ok(DeleteReport { deleted, errors })
    }

    async fn get_object(&self, key: &str) -> Result<ObjectDownload, GatewayError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                GatewayError::Storage(format!(
                    "オブジェクトの取得に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let content_type = resp.content_type().map(str::to_string);
        let content_length = resp.content_length().and_then(|len| u64::try_from(len).ok());

        // SDKの本文は逐次読み出しに対応しているため、全量バッファせず
        // そのままストリームとして中継する。
        let stream = ReaderStream::new(resp.body.into_async_read());

        Ok(ObjectDownload {
            content_type,
            content_length,
            body: ObjectBody::Streamed(stream.boxed()),
        })
    }

    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError> {
        let presign_config =
            PresigningConfig::expires_in(Duration::from_secs(u64::from(expiry_secs)))
                .map_err(|e| GatewayError::Internal(format!("署名付きURL設定の構築に失敗: {e}")))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| {
                GatewayError::Storage(format!(
                    "署名付きURLの生成に失敗: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(presigned.uri().to_string())
    }
}
