//! # テスト支援
//!
//! ストア呼び出しを記録するモックObject Storeと、モックを組み込んだ
//! Gatewayを実際のリスナー上で起動するヘルパー。

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::StreamExt;
use kura_types::{DeleteReport, ListingPage};

use crate::config::GatewayState;
use crate::error::GatewayError;
use crate::storage::{ObjectBody, ObjectDownload, ObjectStore};

/// モックが記録するストア呼び出し。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoreCall {
    Put {
        key: String,
        content_type: String,
        body: Bytes,
    },
    List {
        max_keys: i32,
        continuation_token: Option<String>,
    },
    Delete {
        keys: Vec<String>,
    },
    Get {
        key: String,
    },
    Presign {
        key: String,
        expiry_secs: u32,
    },
}

/// モックのダウンロード応答。
pub(crate) struct MockDownload {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    /// 本文チャンク列。Errは中継中のストリームエラーを表す。
    pub chunks: Vec<Result<Bytes, String>>,
    /// trueなら逐次ストリームではなく全量バッファとして返す
    pub buffered: bool,
}

/// モックの共有内部状態。テスト側から呼び出し記録と応答設定にアクセスする。
#[derive(Default)]
pub(crate) struct MockStoreInner {
    pub calls: Mutex<Vec<StoreCall>>,
    pub list_page: Mutex<ListingPage>,
    pub delete_report: Mutex<DeleteReport>,
    pub download: Mutex<Option<MockDownload>>,
}

/// ストアへの接続なしで動作するモックObject Store。
pub(crate) struct MockObjectStore {
    pub inner: Arc<MockStoreInner>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MockStoreInner::default()),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for MockObjectStore {
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), GatewayError> {
        self.inner.calls.lock().unwrap().push(StoreCall::Put {
            key: key.to_string(),
            content_type: content_type.to_string(),
            body,
        });
        Ok(())
    }

    async fn list_page(
        &self,
        max_keys: i32,
        continuation_token: Option<String>,
    ) -> Result<ListingPage, GatewayError> {
        self.inner.calls.lock().unwrap().push(StoreCall::List {
            max_keys,
            continuation_token,
        });
        Ok(self.inner.list_page.lock().unwrap().clone())
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteReport, GatewayError> {
        self.inner.calls.lock().unwrap().push(StoreCall::Delete {
            keys: keys.to_vec(),
        });
        Ok(self.inner.delete_report.lock().unwrap().clone())
    }

    async fn get_object(&self, key: &str) -> Result<ObjectDownload, GatewayError> {
        self.inner.calls.lock().unwrap().push(StoreCall::Get {
            key: key.to_string(),
        });

        let download = self
            .inner
            .download
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| GatewayError::Storage("オブジェクトの取得に失敗: NoSuchKey".to_string()))?;

        let body = if download.buffered {
            let mut all = Vec::new();
            for chunk in download.chunks {
                all.extend_from_slice(&chunk.expect("バッファモードではエラーチャンクを使用しない"));
            }
            ObjectBody::Buffered(Bytes::from(all))
        } else {
            let chunks = download
                .chunks
                .into_iter()
                .map(|chunk| chunk.map_err(std::io::Error::other));
            ObjectBody::Streamed(futures::stream::iter(chunks).boxed())
        };

        Ok(ObjectDownload {
            content_type: download.content_type,
            content_length: download.content_length,
            body,
        })
    }

    async fn presign_get(&self, key: &str, expiry_secs: u32) -> Result<String, GatewayError> {
        self.inner.calls.lock().unwrap().push(StoreCall::Presign {
            key: key.to_string(),
            expiry_secs,
        });
        Ok(format!("http://mock-storage/{key}?sig=test&expires={expiry_secs}"))
    }
}

/// モックストアを組み込んだGatewayを実際のリスナー上で起動し、アドレスを返す。
pub(crate) async fn spawn_app(store: MockObjectStore) -> SocketAddr {
    let state = Arc::new(GatewayState {
        store: Box::new(store),
        presign_expiry_secs: 3600,
        max_upload_bytes: 64 * 1024 * 1024,
        static_dir: "public".to_string(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, crate::app(state)).await.unwrap();
    });

    addr
}
