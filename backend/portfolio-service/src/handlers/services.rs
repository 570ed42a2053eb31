use super::parse_id;
use crate::db::services;
use crate::error::{AppError, Result};
use crate::middleware::AdminAccount;
use crate::models::ServiceRequest;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

fn not_found() -> AppError {
    AppError::NotFound("Service not found".to_string())
}

pub async fn list_services(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let services = services::list(&pool).await?;
    Ok(HttpResponse::Ok().json(services))
}

pub async fn get_service(pool: web::Data<PgPool>, path: web::Path<String>) -> Result<HttpResponse> {
    let id = parse_id(&path, "service")?;
    let service = services::find_by_id(&pool, id).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(service))
}

pub async fn create_service(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    body: web::Json<ServiceRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    let service = services::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(service))
}

pub async fn update_service(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
    body: web::Json<ServiceRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "service")?;
    body.validate()?;
    let service = services::update(&pool, id, &body).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(service))
}

pub async fn delete_service(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "service")?;
    if !services::delete(&pool, id).await? {
        return Err(not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
