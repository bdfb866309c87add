use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{
    BehaviorVersion, Credentials, Region, RequestChecksumCalculation, timeout::TimeoutConfig,
};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::time::{Duration, Instant};
use tracing::debug;

use super::{ObjectStore, StorageError, public_url};
use crate::config::StorageConfig;

/// S3 client for AWS and S3-compatible servers (`MinIO`, `LocalStack`).
/// Requests are SigV4-signed with the configured key pair. A custom endpoint
/// switches to path-style addressing.
pub struct S3LikeStore {
    config: StorageConfig,
    client: Client,
}

impl S3LikeStore {
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            // S3-compatible servers often reject the default CRC checksum headers.
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired);

        if let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.is_empty()) {
            url::Url::parse(endpoint)
                .map_err(|e| StorageError::Config(format!("invalid endpoint {endpoint}: {e}")))?;
            builder = builder
                .endpoint_url(endpoint.trim_end_matches('/'))
                .force_path_style(true);
        }

        match (&config.access_key_id, &config.secret_access_key) {
            (Some(key_id), Some(secret)) => {
                builder = builder.credentials_provider(Credentials::new(
                    key_id.clone(),
                    secret.clone(),
                    None,
                    None,
                    "shotify-config",
                ));
            }
            (None, None) => {}
            _ => {
                return Err(StorageError::Config(
                    "access key id and secret access key must be set together".to_string(),
                ));
            }
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            config,
        })
    }
}

#[async_trait]
impl ObjectStore for S3LikeStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let started = Instant::now();
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::Request {
                operation: "PutObject",
                key: key.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        metrics::histogram!("storage_put_duration_seconds").record(started.elapsed().as_secs_f64());
        debug!(key, size, "Stored object");
        Ok(())
    }

    /// S3 answers a delete of a missing key with success.
    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Request {
                operation: "DeleteObject",
                key: key.to_string(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        debug!(key, "Deleted object");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_url(&self.config, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Bytes,
        extract::{Request, State},
        http::{HeaderMap, Method, StatusCode},
    };
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Captured {
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
    }

    type Log = Arc<Mutex<Vec<Captured>>>;

    async fn record(State(log): State<Log>, req: Request) -> StatusCode {
        let (parts, body) = req.into_parts();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        log.lock().unwrap().push(Captured {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            headers: parts.headers,
            body,
        });
        if parts.method == Method::DELETE {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::OK
        }
    }

    async fn fake_s3() -> (String, Log) {
        let log = Log::default();
        let app = Router::new().fallback(record).with_state(log.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), log)
    }

    fn config(endpoint: &str) -> StorageConfig {
        StorageConfig {
            bucket: "media".to_string(),
            region: "us-east-1".to_string(),
            endpoint: Some(endpoint.to_string()),
            access_key_id: Some("AKIDSHOTIFYTEST".to_string()),
            secret_access_key: Some("shotify-test-secret".to_string()),
            ..StorageConfig::default()
        }
    }

    #[tokio::test]
    async fn put_is_signed_and_path_style() {
        let (endpoint, log) = fake_s3().await;
        let store = S3LikeStore::new(config(&endpoint)).unwrap();

        store
            .put("uploads/u1/shot.png", b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();

        let captured = log.lock().unwrap().clone();
        assert_eq!(captured.len(), 1);
        let req = &captured[0];
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.path, "/media/uploads/u1/shot.png");
        assert_eq!(req.body.as_ref(), b"png-bytes");
        assert_eq!(req.headers["content-type"], "image/png");

        let auth = req.headers["authorization"].to_str().unwrap();
        assert!(
            auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDSHOTIFYTEST/"),
            "{auth}"
        );
        assert!(auth.contains("/us-east-1/s3/aws4_request"), "{auth}");
        assert!(req.headers.contains_key("x-amz-date"));
        assert!(req.headers.contains_key("x-amz-content-sha256"));
    }

    #[tokio::test]
    async fn delete_is_signed() {
        let (endpoint, log) = fake_s3().await;
        let store = S3LikeStore::new(config(&endpoint)).unwrap();

        store.delete("uploads/u1/shot.png").await.unwrap();

        let captured = log.lock().unwrap().clone();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].method, Method::DELETE);
        assert_eq!(captured[0].path, "/media/uploads/u1/shot.png");
        assert!(
            captured[0].headers["authorization"]
                .to_str()
                .unwrap()
                .starts_with("AWS4-HMAC-SHA256 ")
        );
    }

    #[test]
    fn half_a_key_pair_is_rejected() {
        let mut cfg = config("http://localhost:9000");
        cfg.secret_access_key = None;
        assert!(matches!(
            S3LikeStore::new(cfg),
            Err(StorageError::Config(_))
        ));
    }
}
