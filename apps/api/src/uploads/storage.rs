use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Object storage for uploaded images. Returns the public URL of the stored
/// object.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put_image(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<String, AppError>;
}

pub struct S3ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ImageStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_image(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded image to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}
