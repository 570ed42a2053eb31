/// In-memory repositories backing the service and HTTP tests
use super::{AccountRepository, VideoRepository, VideoUpdate};
use crate::error::{AppError, Result};
use crate::models::{Account, NewAccount, NewVideo, Video};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.write().await;
        // Same guarantee as the unique index on accounts.email
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let now = Utc::now();
        let stored = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            is_admin: account.is_admin,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(stored.id, stored.clone());

        Ok(stored)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
    fail_writes: AtomicBool,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts and updates fail with a database error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.videos.read().await.is_empty()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, video: NewVideo) -> Result<Video> {
        self.check_writable()?;

        let now = Utc::now();
        let stored = Video {
            id: Uuid::new_v4(),
            category: video.metadata.category,
            title: video.metadata.title,
            content: video.metadata.content,
            object_key: video.object_key,
            video_url: video.video_url,
            created_at: now,
            updated_at: now,
        };
        self.videos.write().await.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        Ok(self
            .videos
            .read()
            .await
            .iter()
            .find(|v| v.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Video>> {
        // Reverse first so equal timestamps keep newest-inserted first
        let mut videos: Vec<Video> = self.videos.read().await.iter().rev().cloned().collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>> {
        self.check_writable()?;

        let mut videos = self.videos.write().await;
        let Some(video) = videos.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };

        video.category = update.metadata.category;
        video.title = update.metadata.title;
        video.content = update.metadata.content;
        if let Some(object) = update.object {
            video.object_key = object.key;
            video.video_url = object.url;
        }
        video.updated_at = Utc::now();

        Ok(Some(video.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != id);
        Ok(videos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoMetadata;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
        }
    }

    fn new_video(title: &str) -> NewVideo {
        NewVideo {
            metadata: VideoMetadata {
                category: "talks".to_string(),
                title: title.to_string(),
                content: String::new(),
            },
            object_key: format!("videos/{title}.mp4"),
            video_url: format!("memory://local/videos/{title}.mp4"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryAccountRepository::new();
        repo.insert(new_account("a@x.com")).await.unwrap();

        let err = repo.insert(new_account("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_video_list_newest_first() {
        let repo = InMemoryVideoRepository::new();
        let first = repo.insert(new_video("first")).await.unwrap();
        let second = repo.insert(new_video("second")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_video_update_and_delete() {
        let repo = InMemoryVideoRepository::new();
        let video = repo.insert(new_video("clip")).await.unwrap();

        let updated = repo
            .update(
                video.id,
                VideoUpdate {
                    metadata: VideoMetadata {
                        category: "demos".to_string(),
                        title: "renamed".to_string(),
                        content: "body".to_string(),
                    },
                    object: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.object_key, video.object_key);

        assert!(repo.delete(video.id).await.unwrap());
        assert!(!repo.delete(video.id).await.unwrap());
        assert!(repo.is_empty().await);
    }
}
