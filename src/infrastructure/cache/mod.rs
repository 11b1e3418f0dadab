//! Cache store implementations

mod json;

pub use json::{parse_cache, JsonCacheStore};
