/// Blog queries
///
/// Slugs are unique; a clash surfaces as `Conflict` through the
/// unique-violation mapping on `AppError`. Updates keep the stored slug
/// unless the request names a new one.
use crate::error::Result;
use crate::models::{Blog, BlogRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn list(pool: &PgPool) -> Result<Vec<Blog>> {
    let blogs = sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(blogs)
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Blog>> {
    let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;

    Ok(blog)
}

pub async fn create(pool: &PgPool, req: &BlogRequest) -> Result<Blog> {
    let blog = sqlx::query_as::<_, Blog>(
        r#"
        INSERT INTO blogs (id, title, slug, content, image_url, author, author_image_url,
                           created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.title)
    .bind(req.resolved_slug())
    .bind(&req.content)
    .bind(&req.image_url)
    .bind(&req.author)
    .bind(&req.author_image_url)
    .fetch_one(pool)
    .await?;

    Ok(blog)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &BlogRequest) -> Result<Option<Blog>> {
    let blog = sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
        SET title = $2, slug = COALESCE($3, slug), content = $4, image_url = $5, author = $6,
            author_image_url = $7, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(req.explicit_slug())
    .bind(&req.content)
    .bind(&req.image_url)
    .bind(&req.author)
    .bind(&req.author_image_url)
    .fetch_optional(pool)
    .await?;

    Ok(blog)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
