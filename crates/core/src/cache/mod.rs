mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{parse_profile_key, profile_key, PROFILE_KEY_PREFIX};
pub use serialization::{deserialize_profile, serialize_profile, SerializationError};
pub use traits::Cache;
