use super::parse_id;
use crate::db::blogs;
use crate::error::{AppError, Result};
use crate::middleware::AdminAccount;
use crate::models::BlogRequest;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use validator::Validate;

fn not_found() -> AppError {
    AppError::NotFound("Blog not found".to_string())
}

/// Map a slug clash to a message naming the slug
fn slug_conflict(err: AppError) -> AppError {
    match err {
        AppError::Conflict(_) => AppError::Conflict("A blog with this slug already exists".to_string()),
        other => other,
    }
}

pub async fn list_blogs(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let blogs = blogs::list(&pool).await?;
    Ok(HttpResponse::Ok().json(blogs))
}

pub async fn get_blog_by_slug(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let blog = blogs::find_by_slug(&pool, &path).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn create_blog(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    body: web::Json<BlogRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    let blog = blogs::create(&pool, &body).await.map_err(slug_conflict)?;
    Ok(HttpResponse::Created().json(blog))
}

pub async fn update_blog(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
    body: web::Json<BlogRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "blog")?;
    body.validate()?;
    let blog = blogs::update(&pool, id, &body)
        .await
        .map_err(slug_conflict)?
        .ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn delete_blog(
    pool: web::Data<PgPool>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "blog")?;
    if !blogs::delete(&pool, id).await? {
        return Err(not_found());
    }
    Ok(HttpResponse::NoContent().finish())
}
