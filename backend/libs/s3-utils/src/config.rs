/// S3 configuration for the media object store
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    pub bucket: String,
    /// AWS region
    pub region: String,
    /// Static credentials; the default provider chain is used when absent
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible storage (MinIO, LocalStack)
    pub endpoint: Option<String>,
    /// Base URL for public object links (CDN domain)
    pub public_base_url: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint", &self.endpoint)
            .field("public_base_url", &self.public_base_url)
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl S3Config {
    /// Build the public URL of an object
    pub fn object_url(&self, key: &str) -> String {
        if let Some(base) = &self.public_base_url {
            return format!("{}/{}", base.trim_end_matches('/'), key);
        }

        match (&self.endpoint, self.path_style) {
            (Some(endpoint), _) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            (None, true) => format!("https://s3.amazonaws.com/{}/{}", self.bucket, key),
            (None, false) => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> S3Config {
        S3Config {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            public_base_url: None,
            path_style: false,
        }
    }

    #[test]
    fn test_object_url_virtual_hosted_style() {
        let url = config().object_url("videos/clip.mp4");
        assert_eq!(url, "https://test-bucket.s3.amazonaws.com/videos/clip.mp4");
    }

    #[test]
    fn test_object_url_path_style() {
        let config = S3Config {
            path_style: true,
            ..config()
        };
        assert_eq!(
            config.object_url("videos/clip.mp4"),
            "https://s3.amazonaws.com/test-bucket/videos/clip.mp4"
        );
    }

    #[test]
    fn test_object_url_custom_endpoint() {
        let config = S3Config {
            endpoint: Some("http://localhost:9000/".to_string()),
            path_style: true,
            ..config()
        };
        assert_eq!(
            config.object_url("a.mp4"),
            "http://localhost:9000/test-bucket/a.mp4"
        );
    }

    #[test]
    fn test_public_base_url_wins() {
        let config = S3Config {
            public_base_url: Some("https://cdn.example.com/".to_string()),
            endpoint: Some("http://localhost:9000".to_string()),
            ..config()
        };
        assert_eq!(config.object_url("a.mp4"), "https://cdn.example.com/a.mp4");
    }

    #[test]
    fn test_debug_hides_secret_key() {
        let mut config = config();
        config.secret_access_key = Some("super-secret-key".to_string());

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains(&config.bucket));
    }
}
