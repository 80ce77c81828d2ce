use async_trait::async_trait;
use std::collections::HashSet;

use super::ServiceError;

/// Authenticated caller and the authorities granted to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerPrivileges {
    pub subject: String,
    pub authorities: HashSet<String>,
}

impl CallerPrivileges {
    pub fn new<I, S>(subject: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subject: subject.into(),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// Fails with `ServiceError::Unauthorized` unless `authority` is held.
    pub fn require(&self, authority: &str) -> Result<(), ServiceError> {
        if self.has_authority(authority) {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized(authority.to_string()))
        }
    }
}

/// Resolves inbound bearer credentials to the caller's privileges.
#[async_trait]
pub trait PrivilegeResolver: Send + Sync {
    async fn resolve(&self, bearer_token: &str) -> Result<CallerPrivileges, ServiceError>;
}
