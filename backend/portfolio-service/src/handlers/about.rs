use super::parse_id;
use crate::db::about;
use crate::error::{AppError, Result};
use crate::middleware::AdminAccount;
use crate::models::AboutRequest;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

pub async fn get_about(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let about = about::get_current(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("About section not found".to_string()))?;
    Ok(HttpResponse::Ok().json(about))
}

pub async fn create_about(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    body: web::Json<AboutRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    let about = about::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(about))
}

pub async fn update_about(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
    body: web::Json<AboutRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "about")?;
    body.validate()?;
    let about = about::update(&pool, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound("About section not found".to_string()))?;
    Ok(HttpResponse::Ok().json(about))
}

pub async fn delete_about(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "about")?;
    if !about::delete(&pool, id).await? {
        return Err(AppError::NotFound("About section not found".to_string()));
    }
    Ok(HttpResponse::NoContent().finish())
}
