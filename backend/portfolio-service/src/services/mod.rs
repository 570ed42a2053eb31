pub mod auth;
pub mod media;

pub use auth::{AuthService, Session};
pub use media::{MediaService, ReplaceOrder, Upload};
