#![allow(dead_code)]

use actix_web::web;
use crypto_core::JwtManager;
use portfolio_service::config::{BootstrapAdminConfig, MediaConfig};
use portfolio_service::db::{InMemoryAccountRepository, InMemoryVideoRepository};
use portfolio_service::models::LoginRequest;
use portfolio_service::security::InMemoryRevocationStore;
use portfolio_service::services::{AuthService, MediaService, ReplaceOrder};
use s3_utils::InMemoryObjectStore;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_ID: &str = "admin-1";
pub const ADMIN_EMAIL: &str = "admin@portfolio.test";
pub const ADMIN_PASSWORD: &str = "admin-password-123";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

/// Services wired against in-memory backends, plus handles to inspect them
pub struct TestState {
    pub auth: web::Data<AuthService>,
    pub media: web::Data<MediaService>,
    pub media_config: web::Data<MediaConfig>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub videos: Arc<InMemoryVideoRepository>,
    pub store: Arc<InMemoryObjectStore>,
}

pub fn media_config() -> MediaConfig {
    MediaConfig {
        key_prefix: "videos/".to_string(),
        upload_timeout: Duration::from_secs(5),
        max_upload_bytes: MAX_UPLOAD_BYTES,
        replace_order: ReplaceOrder::UploadFirst,
    }
}

pub async fn setup() -> TestState {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let videos = Arc::new(InMemoryVideoRepository::new());
    let store = Arc::new(InMemoryObjectStore::default());
    let jwt = Arc::new(JwtManager::from_secret(JWT_SECRET, 3600).expect("jwt manager"));

    let auth = AuthService::new(
        accounts.clone(),
        Some(jwt),
        Arc::new(InMemoryRevocationStore::new()),
        Some(ADMIN_ID.to_string()),
    );
    auth.ensure_bootstrap_admin(&BootstrapAdminConfig {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        name: "Admin".to_string(),
    })
    .await
    .expect("bootstrap admin");

    let config = media_config();
    let media = MediaService::new(videos.clone(), store.clone(), &config);

    TestState {
        auth: web::Data::new(auth),
        media: web::Data::new(media),
        media_config: web::Data::new(config),
        accounts,
        videos,
        store,
    }
}

/// Access token obtained through the service, bypassing HTTP
pub async fn token_for(state: &TestState, email: &str, password: &str) -> String {
    state
        .auth
        .login(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("login")
        .token
}

pub async fn admin_token(state: &TestState) -> String {
    token_for(state, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// PostgreSQL database isolated in its own schema, migrations applied
pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

impl TestDb {
    /// Connect through `TEST_DATABASE_URL`; `None` (test skipped) when unset or unreachable
    pub async fn connect() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                eprintln!("Skipping test: TEST_DATABASE_URL not set");
                return None;
            }
        };

        let admin = match PgPoolOptions::new().max_connections(1).connect(&url).await {
            Ok(pool) => pool,
            Err(e) => {
                eprintln!("Skipping test: PostgreSQL not available: {e}");
                return None;
            }
        };

        let schema = format!("portfolio_test_{}", uuid::Uuid::new_v4().simple());
        sqlx::query(&format!("CREATE SCHEMA \"{schema}\""))
            .execute(&admin)
            .await
            .expect("create schema");

        let options = PgConnectOptions::from_str(&url)
            .expect("parse database url")
            .options([("search_path", schema.as_str())]);
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("connect to test schema");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("run migrations");

        Some(Self { pool, admin, schema })
    }

    pub async fn teardown(self) {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.admin)
            .await
            .expect("drop schema");
    }
}

/// Initialize the full route table against a `TestState`, optionally with a database pool
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.auth.clone())
                .app_data($state.media.clone())
                .app_data($state.media_config.clone())
                .configure(portfolio_service::routes::configure),
        )
        .await
    };
    ($state:expr, $pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data($state.auth.clone())
                .app_data($state.media.clone())
                .app_data($state.media_config.clone())
                .configure(portfolio_service::routes::configure),
        )
        .await
    };
}

/// Hand-built multipart/form-data body
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "portfolio-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                self.boundary, name, filename, content_type
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Content-Type header value and the finished body
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}
