use uuid::Uuid;

/// Prefix shared by all profile cache keys.
pub const PROFILE_KEY_PREFIX: &str = "profile:";

/// Returns the cache key for a researcher profile.
///
/// # Examples
///
/// ```
/// use collabgraph_core::cache::profile_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     profile_key(Uuid::nil()),
///     "profile:00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn profile_key(researcher_id: Uuid) -> String {
    format!("{}{}", PROFILE_KEY_PREFIX, researcher_id)
}

/// Extracts the researcher ID from a profile cache key.
///
/// Returns `None` for keys that are not profile keys.
pub fn parse_profile_key(key: &str) -> Option<Uuid> {
    key.strip_prefix(PROFILE_KEY_PREFIX)?.parse().ok()
}
