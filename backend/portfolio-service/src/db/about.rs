/// About section queries
use crate::error::Result;
use crate::models::{About, AboutRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// The about section shown on the site: the earliest record
pub async fn get_current(pool: &PgPool) -> Result<Option<About>> {
    let about = sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY created_at ASC LIMIT 1")
        .fetch_optional(pool)
        .await?;

    Ok(about)
}

pub async fn create(pool: &PgPool, req: &AboutRequest) -> Result<About> {
    let about = sqlx::query_as::<_, About>(
        r#"
        INSERT INTO about (id, title, subtitle, description, image_url, years_experience,
                           project_challenge, positive_reviews, trusted_students,
                           created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.title)
    .bind(&req.subtitle)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(&req.years_experience)
    .bind(&req.project_challenge)
    .bind(&req.positive_reviews)
    .bind(&req.trusted_students)
    .fetch_one(pool)
    .await?;

    Ok(about)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &AboutRequest) -> Result<Option<About>> {
    let about = sqlx::query_as::<_, About>(
        r#"
        UPDATE about
        SET title = $2, subtitle = $3, description = $4, image_url = $5,
            years_experience = $6, project_challenge = $7, positive_reviews = $8,
            trusted_students = $9, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.title)
    .bind(&req.subtitle)
    .bind(&req.description)
    .bind(&req.image_url)
    .bind(&req.years_experience)
    .bind(&req.project_challenge)
    .bind(&req.positive_reviews)
    .bind(&req.trusted_students)
    .fetch_optional(pool)
    .await?;

    Ok(about)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM about WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
