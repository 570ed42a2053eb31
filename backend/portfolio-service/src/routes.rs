/// Route table shared by the server binary and the HTTP tests
use crate::error::AppError;
use crate::handlers::{self, about, blogs, hero, services, users, videos};
use actix_web::{error, web, HttpRequest};

/// Malformed JSON bodies get the standard error envelope; parser detail stays in the logs
fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "rejected JSON body");
    let message = match err {
        error::JsonPayloadError::ContentType => "Expected an application/json body",
        error::JsonPayloadError::OverflowKnownLength { .. } | error::JsonPayloadError::Overflow { .. } => {
            "Request body is too large"
        }
        _ => "Malformed JSON body",
    };
    AppError::BadRequest(message.to_string()).into()
}

fn path_error(err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "rejected path parameters");
    AppError::BadRequest("Invalid path parameters".to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error));

    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/users")
                .route("/signup", web::post().to(users::signup))
                .route("/login", web::post().to(users::login))
                .route("/logout", web::post().to(users::logout)),
        )
        .service(
            web::scope("/about")
                .route("", web::get().to(about::get_about))
                .route("", web::post().to(about::create_about))
                .route("/{id}", web::put().to(about::update_about))
                .route("/{id}", web::delete().to(about::delete_about)),
        )
        .service(
            web::scope("/hero")
                .route("", web::get().to(hero::get_hero))
                .route("", web::post().to(hero::create_hero))
                .route("/{id}", web::put().to(hero::update_hero))
                .route("/{id}", web::delete().to(hero::delete_hero)),
        )
        .service(
            web::scope("/service")
                .route("", web::get().to(services::list_services))
                .route("", web::post().to(services::create_service))
                .route("/{id}", web::get().to(services::get_service))
                .route("/{id}", web::put().to(services::update_service))
                .route("/{id}", web::delete().to(services::delete_service)),
        )
        .service(
            web::scope("/blogs")
                .route("", web::get().to(blogs::list_blogs))
                .route("", web::post().to(blogs::create_blog))
                // One segment: a slug for reads, an id for writes
                .service(
                    web::resource("/{key}")
                        .route(web::get().to(blogs::get_blog_by_slug))
                        .route(web::put().to(blogs::update_blog))
                        .route(web::delete().to(blogs::delete_blog)),
                ),
        )
        .service(
            web::scope("/videos")
                .route("", web::get().to(videos::list_videos))
                .route("/{id}", web::get().to(videos::get_video)),
        )
        .service(
            web::scope("/admin/videos")
                .route("", web::post().to(videos::create_video))
                .route("/{id}", web::get().to(videos::admin_get_video))
                .route("/{id}", web::put().to(videos::update_video))
                .route("/{id}", web::delete().to(videos::delete_video)),
        );
}
