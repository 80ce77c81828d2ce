//! Authority model - a named role known to the authentication server.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Authority required to list authorities unless overridden by configuration.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Authority entity. `name` is unique and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Authority {
    pub name: String,
}

impl Authority {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
