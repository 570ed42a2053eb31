/// Portfolio Service - HTTP Server
///
/// Serves the account, content and video endpoints for the portfolio site.
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use crypto_core::JwtManager;
use portfolio_service::config::StorageConfig;
use portfolio_service::db::{PgAccountRepository, PgVideoRepository};
use portfolio_service::middleware::RequestLogging;
use portfolio_service::routes;
use portfolio_service::security::{InMemoryRevocationStore, RedisRevocationStore, TokenRevocationStore};
use portfolio_service::services::{AuthService, MediaService};
use portfolio_service::Config;
use s3_utils::{InMemoryObjectStore, ObjectStore, S3ObjectStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(?config, "configuration loaded");

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("database migrations applied");

    let jwt = match config.auth.jwt_secret.as_deref() {
        Some(secret) => Some(Arc::new(
            JwtManager::from_secret(secret, config.auth.jwt_expiry_secs)
                .context("Failed to initialize JWT signing")?,
        )),
        None => {
            tracing::warn!("JWT_SECRET not set; login and protected routes will fail");
            None
        }
    };

    let revocations: Arc<dyn TokenRevocationStore> = match config.cache.redis_url.as_deref() {
        Some(url) => {
            let store = RedisRevocationStore::connect(url)
                .await
                .context("Failed to initialize revocation store")?;
            tracing::info!("token revocation backed by Redis");
            Arc::new(store)
        }
        None => {
            tracing::warn!("REDIS_URL not set; revoked tokens are tracked in process only");
            Arc::new(InMemoryRevocationStore::new())
        }
    };

    let store: Arc<dyn ObjectStore> = match &config.storage {
        StorageConfig::S3(s3_config) => {
            let store = S3ObjectStore::connect(s3_config.clone()).await;
            store
                .ensure_bucket()
                .await
                .context("Failed to prepare S3 bucket")?;
            tracing::info!(bucket = %s3_config.bucket, region = %s3_config.region, "object storage ready");
            Arc::new(store)
        }
        StorageConfig::Memory => {
            tracing::warn!("using in-memory object storage; uploads are lost on restart");
            Arc::new(InMemoryObjectStore::default())
        }
    };

    let auth_service = AuthService::new(
        Arc::new(PgAccountRepository::new(db_pool.clone())),
        jwt,
        revocations,
        config.auth.admin_id.clone(),
    );
    if let Some(admin) = &config.auth.bootstrap_admin {
        auth_service
            .ensure_bootstrap_admin(admin)
            .await
            .context("Failed to provision bootstrap admin")?;
    }

    let media_service = MediaService::new(
        Arc::new(PgVideoRepository::new(db_pool.clone())),
        store,
        &config.media,
    );

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("portfolio-service listening on {}", bind_address);

    let pool_data = web::Data::new(db_pool);
    let auth_data = web::Data::new(auth_service);
    let media_data = web::Data::new(media_service);
    let media_config = web::Data::new(config.media.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(pool_data.clone())
            .app_data(auth_data.clone())
            .app_data(media_data.clone())
            .app_data(media_config.clone())
            .wrap(RequestLogging)
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("portfolio-service shutting down");
    Ok(())
}
