/// Media ingestion service
///
/// Pairs a binary object in the object store with a metadata row. Writes are
/// ordered so a failure never leaves the row pointing at a missing object
/// without an `error` log naming the key.
use crate::config::MediaConfig;
use crate::db::{StoredObject, VideoRepository, VideoUpdate};
use crate::error::{AppError, Result};
use crate::models::{NewVideo, Video, VideoMetadata};
use bytes::Bytes;
use s3_utils::ObjectStore;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
const MAX_EXTENSION_LEN: usize = 10;

/// Order of operations when an update replaces the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceOrder {
    /// Upload new, update row, then delete old
    #[default]
    UploadFirst,
    /// Delete old, upload new, then update row
    DeleteFirst,
}

impl FromStr for ReplaceOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload-first" | "upload_first" => Ok(Self::UploadFirst),
            "delete-first" | "delete_first" => Ok(Self::DeleteFirst),
            other => Err(format!(
                "invalid VIDEO_REPLACE_ORDER '{other}', expected 'upload-first' or 'delete-first'"
            )),
        }
    }
}

/// Uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct MediaService {
    videos: Arc<dyn VideoRepository>,
    store: Arc<dyn ObjectStore>,
    key_prefix: String,
    upload_timeout: Duration,
    replace_order: ReplaceOrder,
}

impl MediaService {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn ObjectStore>,
        config: &MediaConfig,
    ) -> Self {
        Self {
            videos,
            store,
            key_prefix: config.key_prefix.clone(),
            upload_timeout: config.upload_timeout,
            replace_order: config.replace_order,
        }
    }

    /// Store the binary, then record its metadata
    pub async fn create(&self, metadata: VideoMetadata, upload: Upload) -> Result<Video> {
        metadata.validate()?;
        ensure_not_empty(&upload)?;

        let key = self.derive_key(upload.filename.as_deref());
        let video_url = self.put_object(&key, upload).await?;

        let video = self
            .videos
            .insert(NewVideo {
                metadata,
                object_key: key.clone(),
                video_url,
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    object_key = %key,
                    error = %e,
                    "orphaned object: metadata insert failed after upload"
                );
                AppError::Internal(format!("failed to record video {key}: {e}"))
            })?;

        tracing::info!(video_id = %video.id, object_key = %video.object_key, "video created");
        Ok(video)
    }

    /// Replace metadata and, optionally, the binary
    pub async fn update(
        &self,
        id: Uuid,
        metadata: VideoMetadata,
        upload: Option<Upload>,
    ) -> Result<Video> {
        let existing = self.get(id).await?;
        metadata.validate()?;

        let Some(upload) = upload else {
            return self
                .videos
                .update(
                    id,
                    VideoUpdate {
                        metadata,
                        object: None,
                    },
                )
                .await?
                .ok_or_else(|| video_not_found(id));
        };
        ensure_not_empty(&upload)?;

        match self.replace_order {
            ReplaceOrder::UploadFirst => self.replace_upload_first(existing, metadata, upload).await,
            ReplaceOrder::DeleteFirst => self.replace_delete_first(existing, metadata, upload).await,
        }
    }

    async fn replace_upload_first(
        &self,
        existing: Video,
        metadata: VideoMetadata,
        upload: Upload,
    ) -> Result<Video> {
        let new_key = self.derive_key(upload.filename.as_deref());
        let new_url = self.put_object(&new_key, upload).await?;

        let updated = self
            .videos
            .update(
                existing.id,
                VideoUpdate {
                    metadata,
                    object: Some(StoredObject {
                        key: new_key.clone(),
                        url: new_url,
                    }),
                },
            )
            .await;

        let updated = match updated {
            Ok(Some(video)) => video,
            Ok(None) => {
                tracing::error!(
                    video_id = %existing.id,
                    object_key = %new_key,
                    "orphaned object: video removed during update"
                );
                return Err(video_not_found(existing.id));
            }
            Err(e) => {
                tracing::error!(
                    video_id = %existing.id,
                    object_key = %new_key,
                    error = %e,
                    "orphaned object: metadata update failed after upload"
                );
                return Err(e);
            }
        };

        if let Err(e) = self.store.delete(&existing.object_key).await {
            // The row already points at the new object
            tracing::error!(
                video_id = %existing.id,
                object_key = %existing.object_key,
                error = %e,
                "orphaned object: failed to delete replaced object"
            );
        }

        tracing::info!(video_id = %updated.id, object_key = %updated.object_key, "video replaced");
        Ok(updated)
    }

    async fn replace_delete_first(
        &self,
        existing: Video,
        metadata: VideoMetadata,
        upload: Upload,
    ) -> Result<Video> {
        self.store.delete(&existing.object_key).await?;

        let new_key = self.derive_key(upload.filename.as_deref());
        let new_url = match self.put_object(&new_key, upload).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    video_id = %existing.id,
                    object_key = %existing.object_key,
                    error = %e,
                    "dangling reference: old object deleted but replacement upload failed"
                );
                return Err(AppError::Internal(format!(
                    "replacement upload for video {} failed: {e}",
                    existing.id
                )));
            }
        };

        let updated = self
            .videos
            .update(
                existing.id,
                VideoUpdate {
                    metadata,
                    object: Some(StoredObject {
                        key: new_key.clone(),
                        url: new_url,
                    }),
                },
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    video_id = %existing.id,
                    object_key = %new_key,
                    stale_key = %existing.object_key,
                    error = %e,
                    "dangling reference: metadata update failed after replacement upload"
                );
                e
            })?
            .ok_or_else(|| {
                tracing::error!(
                    video_id = %existing.id,
                    object_key = %new_key,
                    "orphaned object: video removed during update"
                );
                video_not_found(existing.id)
            })?;

        tracing::info!(video_id = %updated.id, object_key = %updated.object_key, "video replaced");
        Ok(updated)
    }

    /// Delete the object, then the row; the row survives a failed object delete
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let existing = self.get(id).await?;

        if let Err(e) = self.store.delete(&existing.object_key).await {
            tracing::error!(
                video_id = %id,
                object_key = %existing.object_key,
                error = %e,
                "object delete failed; metadata kept for retry"
            );
            return Err(e.into());
        }

        if !self.videos.delete(id).await? {
            tracing::warn!(video_id = %id, "video row already gone after object delete");
        }

        tracing::info!(video_id = %id, object_key = %existing.object_key, "video deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Video> {
        self.videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| video_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Video>> {
        self.videos.list().await
    }

    /// Fetch the stored bytes behind a video
    pub async fn fetch_object(&self, video: &Video) -> Result<Bytes> {
        Ok(self.store.get(&video.object_key).await?)
    }

    /// `{prefix}{uuid}{.ext}`; the client filename only contributes a sane extension
    fn derive_key(&self, filename: Option<&str>) -> String {
        let extension = filename.and_then(safe_extension);
        match extension {
            Some(ext) => format!("{}{}.{}", self.key_prefix, Uuid::new_v4(), ext),
            None => format!("{}{}", self.key_prefix, Uuid::new_v4()),
        }
    }

    async fn put_object(&self, key: &str, upload: Upload) -> Result<String> {
        let content_type = upload
            .content_type
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let size = upload.bytes.len();

        match tokio::time::timeout(
            self.upload_timeout,
            self.store.put(key, upload.bytes, &content_type),
        )
        .await
        {
            Ok(Ok(location)) => {
                tracing::debug!(object_key = %key, size, "object stored");
                Ok(location)
            }
            Ok(Err(e)) => Err(AppError::Internal(format!("upload of {key} failed: {e}"))),
            Err(_) => {
                tracing::warn!(
                    object_key = %key,
                    timeout_secs = self.upload_timeout.as_secs(),
                    "upload timed out"
                );
                Err(AppError::Internal(format!("upload of {key} timed out")))
            }
        }
    }
}

fn ensure_not_empty(upload: &Upload) -> Result<()> {
    if upload.bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }
    Ok(())
}

fn video_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Video {id} not found"))
}

/// Lower-cased extension if it is 1-10 ASCII alphanumerics
fn safe_extension(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let valid = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}
