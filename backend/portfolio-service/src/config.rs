/// Configuration management for portfolio-service
///
/// Loads configuration from environment variables with sensible defaults.
/// `DATABASE_URL` is the only always-required value; the S3 settings are
/// required when the S3 storage backend is selected.
use crate::services::media::ReplaceOrder;
use anyhow::{anyhow, bail, Context, Result};
use s3_utils::S3Config;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub media: MediaConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &redact_url_credentials(&self.url))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Replace the `user:password@` part of a connection URL
fn redact_url_credentials(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://<redacted>@{}", &url[..scheme_end], &rest[at + 1..]),
        None => url.to_string(),
    }
}

#[derive(Clone)]
pub struct AuthConfig {
    /// Signing secret; when absent every authorize call is rejected
    pub jwt_secret: Option<String>,
    pub jwt_expiry_secs: i64,
    /// Pre-shared identifier gating signup
    pub admin_id: Option<String>,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("jwt_expiry_secs", &self.jwt_expiry_secs)
            .field("admin_id", &self.admin_id.as_ref().map(|_| "<redacted>"))
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

#[derive(Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub enum StorageConfig {
    S3(S3Config),
    Memory,
}

#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub key_prefix: String,
    pub upload_timeout: Duration,
    pub max_upload_bytes: usize,
    pub replace_order: ReplaceOrder,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Revocation store backend; in-process when absent
    pub redis_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app = AppConfig {
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(get("PORT"), "PORT", 8080)?,
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: parse_or(
                get("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                10,
            )?,
        };

        let bootstrap_admin = match (get("BOOTSTRAP_ADMIN_EMAIL"), get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdminConfig {
                email,
                password,
                name: get("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|| "Administrator".to_string()),
            }),
            (None, None) => None,
            _ => bail!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        };

        let auth = AuthConfig {
            jwt_secret: get("JWT_SECRET"),
            jwt_expiry_secs: parse_or(
                get("JWT_EXPIRY_SECS"),
                "JWT_EXPIRY_SECS",
                crypto_core::jwt::DEFAULT_ACCESS_TOKEN_EXPIRY_SECS,
            )?,
            admin_id: get("ADMIN_ID"),
            bootstrap_admin,
        };
        if auth.jwt_expiry_secs <= 0 {
            bail!("JWT_EXPIRY_SECS must be positive");
        }

        let storage = match get("STORAGE_BACKEND").as_deref().unwrap_or("s3") {
            "s3" => {
                let endpoint = get("S3_ENDPOINT");
                StorageConfig::S3(S3Config {
                    bucket: get("AWS_BUCKET")
                        .or_else(|| get("S3_BUCKET"))
                        .context("AWS_BUCKET must be set for the s3 storage backend")?,
                    region: get("AWS_REGION")
                        .context("AWS_REGION must be set for the s3 storage backend")?,
                    access_key_id: get("AWS_ACCESS_KEY_ID"),
                    secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
                    path_style: endpoint.is_some(),
                    endpoint,
                    public_base_url: get("S3_PUBLIC_BASE_URL"),
                })
            }
            "memory" => StorageConfig::Memory,
            other => bail!("unknown STORAGE_BACKEND '{other}', expected 's3' or 'memory'"),
        };

        let media = MediaConfig {
            key_prefix: get("VIDEO_KEY_PREFIX").unwrap_or_else(|| "videos/".to_string()),
            upload_timeout: Duration::from_secs(parse_or(
                get("UPLOAD_TIMEOUT_SECS"),
                "UPLOAD_TIMEOUT_SECS",
                120,
            )?),
            max_upload_bytes: parse_or(get("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES", 500 * 1024 * 1024)?,
            replace_order: match get("VIDEO_REPLACE_ORDER") {
                Some(raw) => raw.parse().map_err(|e: String| anyhow!(e))?,
                None => ReplaceOrder::default(),
            },
        };

        let cache = CacheConfig {
            redis_url: get("REDIS_URL"),
        };

        Ok(Config {
            app,
            database,
            auth,
            storage,
            media,
            cache,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {key}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_memory_storage() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/portfolio"),
            ("STORAGE_BACKEND", "memory"),
        ])
        .unwrap();

        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.jwt_expiry_secs, 86400);
        assert!(config.auth.jwt_secret.is_none());
        assert!(config.auth.bootstrap_admin.is_none());
        assert!(matches!(config.storage, StorageConfig::Memory));
        assert_eq!(config.media.key_prefix, "videos/");
        assert_eq!(config.media.upload_timeout, Duration::from_secs(120));
        assert_eq!(config.media.max_upload_bytes, 524_288_000);
        assert_eq!(config.media.replace_order, ReplaceOrder::UploadFirst);
        assert!(config.cache.redis_url.is_none());
    }

    #[test]
    fn test_database_url_required() {
        assert!(load(&[("STORAGE_BACKEND", "memory")]).is_err());
    }

    #[test]
    fn test_s3_backend_requires_bucket_and_region() {
        let err = load(&[("DATABASE_URL", "postgres://x")]).unwrap_err();
        assert!(err.to_string().contains("AWS_BUCKET"));

        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("S3_BUCKET", "portfolio-media"),
            ("AWS_REGION", "eu-west-1"),
            ("S3_ENDPOINT", "http://localhost:9000"),
        ])
        .unwrap();

        match config.storage {
            StorageConfig::S3(s3) => {
                assert_eq!(s3.bucket, "portfolio-media");
                assert_eq!(s3.region, "eu-west-1");
                assert!(s3.path_style);
            }
            StorageConfig::Memory => panic!("expected s3 storage"),
        }
    }

    #[test]
    fn test_replace_order_and_bad_values() {
        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("STORAGE_BACKEND", "memory"),
            ("VIDEO_REPLACE_ORDER", "delete-first"),
        ])
        .unwrap();
        assert_eq!(config.media.replace_order, ReplaceOrder::DeleteFirst);

        assert!(load(&[
            ("DATABASE_URL", "postgres://x"),
            ("STORAGE_BACKEND", "memory"),
            ("VIDEO_REPLACE_ORDER", "sideways"),
        ])
        .is_err());

        assert!(load(&[
            ("DATABASE_URL", "postgres://x"),
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "not-a-port"),
        ])
        .is_err());
    }

    #[test]
    fn test_bootstrap_admin_needs_both_fields() {
        assert!(load(&[
            ("DATABASE_URL", "postgres://x"),
            ("STORAGE_BACKEND", "memory"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
        ])
        .is_err());

        let config = load(&[
            ("DATABASE_URL", "postgres://x"),
            ("STORAGE_BACKEND", "memory"),
            ("BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
            ("BOOTSTRAP_ADMIN_PASSWORD", "correct horse"),
        ])
        .unwrap();
        let admin = config.auth.bootstrap_admin.unwrap();
        assert_eq!(admin.name, "Administrator");
        assert!(!format!("{admin:?}").contains("correct horse"));
    }

    #[test]
    fn test_debug_output_hides_credentials() {
        let config = load(&[
            ("DATABASE_URL", "postgres://app:db-pass-XYZ@db:5432/portfolio"),
            ("AWS_BUCKET", "portfolio-media"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "aws-secret-XYZ"),
            ("JWT_SECRET", "jwt-secret-XYZ"),
        ])
        .unwrap();

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("aws-secret-XYZ"));
        assert!(!rendered.contains("db-pass-XYZ"));
        assert!(!rendered.contains("jwt-secret-XYZ"));
        assert!(rendered.contains("db:5432/portfolio"));
        assert!(rendered.contains("portfolio-media"));
    }

    #[test]
    fn test_redact_url_credentials() {
        assert_eq!(
            redact_url_credentials("postgres://u:p@host/db"),
            "postgres://<redacted>@host/db"
        );
        assert_eq!(
            redact_url_credentials("postgres://localhost/db"),
            "postgres://localhost/db"
        );
        assert_eq!(redact_url_credentials("not a url"), "not a url");
    }
}
