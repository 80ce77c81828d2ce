//! Services layer for authority-service.
//!
//! Holds the authority query path and the collaborators it is built from:
//! the authority store and the caller privilege resolver.

mod authority;
pub mod error;
mod jwt;
pub mod metrics;
mod privileges;
mod store;

pub use authority::AuthorityQueryService;
pub use error::ServiceError;
pub use jwt::{AccessTokenClaims, JwtService};
pub use privileges::{CallerPrivileges, PrivilegeResolver};
pub use store::{AuthorityStore, InMemoryAuthorityStore, PgAuthorityStore};
