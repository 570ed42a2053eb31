pub mod password;
pub mod revocation;

pub use revocation::{InMemoryRevocationStore, RedisRevocationStore, TokenRevocationStore};
