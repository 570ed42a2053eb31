/// Persistence for portfolio-service
///
/// Accounts and videos sit behind repository traits so the auth and media
/// services can run against PostgreSQL or the in-memory implementations.
/// Content sections are plain query functions on `&PgPool`.
use crate::error::Result;
use crate::models::{Account, NewAccount, NewVideo, Video, VideoMetadata};
use async_trait::async_trait;
use uuid::Uuid;

pub mod about;
pub mod accounts;
pub mod blogs;
pub mod hero;
pub mod memory;
pub mod services;
pub mod videos;

pub use accounts::PgAccountRepository;
pub use memory::{InMemoryAccountRepository, InMemoryVideoRepository};
pub use videos::PgVideoRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Insert a new account; a duplicate email fails with `Conflict`
    async fn insert(&self, account: NewAccount) -> Result<Account>;
}

/// Replacement object reference for a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct VideoUpdate {
    pub metadata: VideoMetadata,
    pub object: Option<StoredObject>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn insert(&self, video: NewVideo) -> Result<Video>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>>;

    /// All videos, newest first
    async fn list(&self) -> Result<Vec<Video>>;

    /// Apply `update`, returning `None` when the record is gone
    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
