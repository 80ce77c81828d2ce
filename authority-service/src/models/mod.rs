pub mod authority;

pub use authority::{Authority, ROLE_ADMIN};
