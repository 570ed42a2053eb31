//! Cryptographic helpers shared by the portfolio backend
//!
//! - `jwt`: HS256 session tokens (`JwtManager`, `Claims`)

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtManager, VALIDATION_LEEWAY_SECS};
