/// Data models for portfolio-service
///
/// - `account`: accounts and the auth request/response bodies
/// - `video`: media records and their metadata
/// - `content`: about, hero, service and blog sections
pub mod account;
pub mod content;
pub mod video;

pub use account::{Account, AccountResponse, LoginRequest, LoginResponse, NewAccount, SignupRequest};
pub use content::{About, AboutRequest, Blog, BlogRequest, Hero, HeroRequest, Service, ServiceRequest};
pub use video::{NewVideo, Video, VideoMetadata};
