//! Request extractors for authentication and authorization.
//!
//! - [`auth::AuthUser`]: the caller identified by a Bearer token.
//! - [`rbac::RequireAdmin`]: an [`auth::AuthUser`] with the `admin` role.

pub mod auth;
pub mod rbac;
