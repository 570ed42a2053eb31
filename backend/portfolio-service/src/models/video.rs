use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Media record referencing an object in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: Uuid,
    pub category: String,
    pub title: String,
    pub content: String,
    /// Storage key of the binary object
    pub object_key: String,
    /// Public location returned by the object store
    pub video_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Descriptive fields supplied with an upload
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct VideoMetadata {
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,

    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,

    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub metadata: VideoMetadata,
    pub object_key: String,
    pub video_url: String,
}
