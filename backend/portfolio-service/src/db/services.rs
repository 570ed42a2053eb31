/// Service (offering) section queries
use crate::error::Result;
use crate::models::{Service, ServiceRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn list(pool: &PgPool) -> Result<Vec<Service>> {
    let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY created_at ASC")
        .fetch_all(pool)
        .await?;

    Ok(services)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(service)
}

pub async fn create(pool: &PgPool, req: &ServiceRequest) -> Result<Service> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO services (id, image, name, location, description, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.image)
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.description)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &ServiceRequest) -> Result<Option<Service>> {
    let service = sqlx::query_as::<_, Service>(
        r#"
        UPDATE services
        SET image = $2, name = $3, location = $4, description = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.image)
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.description)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
