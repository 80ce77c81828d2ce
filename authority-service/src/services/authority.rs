use metrics::counter;
use std::sync::Arc;

use super::{AuthorityStore, CallerPrivileges, ServiceError};
use crate::dtos::authority::AuthorityResponse;

/// Administrative read access to the authorities known to the server.
#[derive(Clone)]
pub struct AuthorityQueryService {
    store: Arc<dyn AuthorityStore>,
    admin_authority: String,
}

impl AuthorityQueryService {
    pub fn new(store: Arc<dyn AuthorityStore>, admin_authority: impl Into<String>) -> Self {
        Self {
            store,
            admin_authority: admin_authority.into(),
        }
    }

    /// List every authority for a caller holding the admin authority.
    ///
    /// The store is not queried when the caller is not an admin. Results
    /// keep the store's order; no sort is applied.
    #[tracing::instrument(skip_all, fields(subject = %caller.subject))]
    pub async fn list_authorities(
        &self,
        caller: &CallerPrivileges,
    ) -> Result<Vec<AuthorityResponse>, ServiceError> {
        if let Err(e) = caller.require(&self.admin_authority) {
            tracing::warn!(
                required = %self.admin_authority,
                "Authority listing denied"
            );
            counter!("authority_queries_total", "outcome" => "denied").increment(1);
            return Err(e);
        }

        let authorities = self.store.find_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to enumerate authorities");
            counter!("authority_queries_total", "outcome" => "store_error").increment(1);
            e
        })?;

        let responses: Vec<AuthorityResponse> = authorities
            .into_iter()
            .map(AuthorityResponse::from)
            .collect();

        tracing::debug!(count = responses.len(), "Listed authorities");
        counter!("authority_queries_total", "outcome" => "ok").increment(1);

        Ok(responses)
    }
}
