use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Authority;

/// Wire representation of an authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorityResponse {
    #[schema(example = "ROLE_ADMIN")]
    pub name: String,
}

impl From<Authority> for AuthorityResponse {
    fn from(authority: Authority) -> Self {
        Self {
            name: authority.name,
        }
    }
}
