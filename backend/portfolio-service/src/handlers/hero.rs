use super::parse_id;
use crate::db::hero;
use crate::error::{AppError, Result};
use crate::middleware::AdminAccount;
use crate::models::HeroRequest;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

fn not_found() -> AppError {
    AppError::NotFound("Hero section not found".to_string())
}

pub async fn get_hero(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let hero = hero::get_current(&pool).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(hero))
}

pub async fn create_hero(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    body: web::Json<HeroRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    let hero = hero::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(hero))
}

pub async fn update_hero(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
    body: web::Json<HeroRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "hero")?;
    body.validate()?;
    let hero = hero::update(&pool, id, &body).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(hero))
}

pub async fn delete_hero(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "hero")?;
    if !hero::delete(&pool, id).await? {
        return Err(not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
