/// Content sections: about, hero, service and blog
///
/// All four follow the same contract: a stored record keyed by UUID and a
/// request body carrying every writable field.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// ========================================
// About
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct About {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub years_experience: String,
    pub project_challenge: String,
    pub positive_reviews: String,
    pub trusted_students: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AboutRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub years_experience: String,
    #[serde(default)]
    pub project_challenge: String,
    #[serde(default)]
    pub positive_reviews: String,
    #[serde(default)]
    pub trusted_students: String,
}

// ========================================
// Hero
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hero {
    pub id: Uuid,
    pub heading_text: String,
    pub sub_heading_text: String,
    pub tool_tip_name: String,
    pub image: String,
    pub designation: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeroRequest {
    #[validate(length(min = 1, max = 255))]
    pub heading_text: String,
    #[serde(default)]
    pub sub_heading_text: String,
    #[serde(default)]
    pub tool_tip_name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub designation: String,
}

// ========================================
// Service
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub image: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

// ========================================
// Blog
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub image_url: String,
    pub author: String,
    pub author_image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BlogRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Generated from the title when omitted
    #[serde(default)]
    #[validate(length(max = 300, message = "slug must be at most 300 characters"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_image_url: String,
}

impl BlogRequest {
    /// Slug to store: the supplied one, or one derived from the title
    pub fn resolved_slug(&self) -> String {
        self.explicit_slug()
            .unwrap_or_else(|| generate_slug(&self.title))
    }

    /// Caller-supplied slug, ignoring blanks
    pub fn explicit_slug(&self) -> Option<String> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
    }
}

/// `slugify(title)` plus the first 8 hex chars of a fresh UUID
pub fn generate_slug(title: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let base = slugify(title);
    if base.is_empty() {
        suffix[..8].to_string()
    } else {
        format!("{}-{}", base, &suffix[..8])
    }
}

/// Lower-case ASCII alphanumerics separated by single dashes
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
