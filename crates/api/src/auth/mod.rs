//! Bearer-token primitives. Tokens are issued by the account service; this
//! server only validates them.

pub mod jwt;

/// Role carried by operators allowed to read worker-pool internals.
pub const ROLE_ADMIN: &str = "admin";
