//! Recently-viewed list constants and key layout.

use std::time::Duration;

use crate::types::DbId;

/// Prefix of the per-user list key in the cache store.
pub const KEY_PREFIX: &str = "recently_viewed:user:";

/// Maximum number of cartoons kept per user.
pub const MAX_ENTRIES: usize = 5;

/// Sliding expiry applied to the whole list on every successful update.
pub const TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cache key holding the list for `user_id`.
pub fn list_key(user_id: DbId) -> String {
    format!("{KEY_PREFIX}{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_user_id() {
        assert_eq!(list_key(42), "recently_viewed:user:42");
    }
}
