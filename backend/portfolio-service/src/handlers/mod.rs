/// HTTP handlers for portfolio-service
///
/// Thin adapters: parse the request, call a service or query function, map
/// the result to a response. Write endpoints take an `AdminAccount`.
use crate::error::{AppError, Result};
use actix_web::HttpResponse;
use uuid::Uuid;

pub mod about;
pub mod blogs;
pub mod hero;
pub mod services;
pub mod users;
pub mod videos;

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "portfolio-service",
    }))
}

/// Parse a path identifier, rejecting malformed UUIDs as bad input
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid {what} id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "video").unwrap(), id);

        let err = parse_id("42", "video").unwrap_err();
        assert_eq!(err.to_string(), "Invalid video id");
    }
}
