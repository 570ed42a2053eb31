/// S3-backed implementation of `ObjectStore`
use crate::config::S3Config;
use crate::{ObjectStore, Result, StorageError};
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;

#[derive(Clone)]
pub struct S3ObjectStore {
    client: Arc<Client>,
    config: S3Config,
}

impl S3ObjectStore {
    /// Create a client from configuration
    ///
    /// Static credentials are used when both keys are present, otherwise the
    /// default AWS provider chain applies. A custom endpoint forces
    /// path-style addressing.
    pub async fn connect(config: S3Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key_id), Some(secret_access_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "portfolio_s3",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        Self {
            client: Arc::new(Client::from_conf(s3_config)),
            config,
        }
    }

    /// Get S3 configuration
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Make sure the configured bucket exists, creating it when missing
    pub async fn ensure_bucket(&self) -> Result<()> {
        let bucket = &self.config.bucket;

        let err = match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        let missing = err
            .as_service_error()
            .map(|e| e.is_not_found())
            .unwrap_or(false);
        if !missing {
            return Err(StorageError::Backend(format!(
                "failed to check bucket {bucket}: {err}"
            )));
        }

        tracing::info!(bucket = %bucket, "bucket does not exist, creating");

        let mut request = self.client.create_bucket().bucket(bucket);
        // us-east-1 rejects an explicit location constraint
        if self.config.region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(
                        self.config.region.as_str(),
                    ))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to create bucket {bucket}: {e}")))?;

        tracing::info!(bucket = %bucket, "bucket created");
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("NoSuchBucket") {
                    StorageError::Backend(format!("bucket not found: {}", self.config.bucket))
                } else {
                    StorageError::Backend(format!("upload of {key} failed: {msg}"))
                }
            })?;

        Ok(self.config.object_url(key))
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let response = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().map(|s| s.is_no_such_key()).unwrap_or(false) {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::Backend(format!("download of {key} failed: {e}"))
                }
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Backend(format!("failed to read {key}: {e}")))?;
        Ok(body.into_bytes())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Backend(format!("delete of {key} failed: {e}")))?;

        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let response = self
                .client
                .list_objects_v2()
                .bucket(&self.config.bucket)
                .prefix(prefix)
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| StorageError::Backend(format!("list of {prefix} failed: {e}")))?;

            keys.extend(
                response
                    .contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(|k| k.to_string())),
            );

            match response.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(keys)
    }
}
