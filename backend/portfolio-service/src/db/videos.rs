/// Video metadata persistence on PostgreSQL
use super::{VideoRepository, VideoUpdate};
use crate::error::Result;
use crate::models::{NewVideo, Video};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn insert(&self, video: NewVideo) -> Result<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, category, title, content, object_key, video_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&video.metadata.category)
        .bind(&video.metadata.title)
        .bind(&video.metadata.content)
        .bind(&video.object_key)
        .bind(&video.video_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn list(&self) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>> {
        let (object_key, video_url) = match update.object {
            Some(object) => (Some(object.key), Some(object.url)),
            None => (None, None),
        };

        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET category = $2,
                title = $3,
                content = $4,
                object_key = COALESCE($5, object_key),
                video_url = COALESCE($6, video_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.metadata.category)
        .bind(&update.metadata.title)
        .bind(&update.metadata.content)
        .bind(object_key)
        .bind(video_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
