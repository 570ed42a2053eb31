/// Hero section queries
use crate::error::Result;
use crate::models::{Hero, HeroRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn get_current(pool: &PgPool) -> Result<Option<Hero>> {
    let hero =
        sqlx::query_as::<_, Hero>("SELECT * FROM hero_sections ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(hero)
}

pub async fn create(pool: &PgPool, req: &HeroRequest) -> Result<Hero> {
    let hero = sqlx::query_as::<_, Hero>(
        r#"
        INSERT INTO hero_sections (id, heading_text, sub_heading_text, tool_tip_name, image,
                                   designation, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.heading_text)
    .bind(&req.sub_heading_text)
    .bind(&req.tool_tip_name)
    .bind(&req.image)
    .bind(&req.designation)
    .fetch_one(pool)
    .await?;

    Ok(hero)
}

pub async fn update(pool: &PgPool, id: Uuid, req: &HeroRequest) -> Result<Option<Hero>> {
    let hero = sqlx::query_as::<_, Hero>(
        r#"
        UPDATE hero_sections
        SET heading_text = $2, sub_heading_text = $3, tool_tip_name = $4, image = $5,
            designation = $6, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&req.heading_text)
    .bind(&req.sub_heading_text)
    .bind(&req.tool_tip_name)
    .bind(&req.image)
    .bind(&req.designation)
    .fetch_optional(pool)
    .await?;

    Ok(hero)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM hero_sections WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
