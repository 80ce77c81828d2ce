use async_trait::async_trait;
use sqlx::postgres::PgPool;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::ServiceError;
use crate::models::Authority;

/// Read access to the persisted authorities.
#[async_trait]
pub trait AuthorityStore: Send + Sync {
    /// Every authority, in whatever order the store yields them. Either the
    /// full set or an error; never a partial list.
    async fn find_all(&self) -> Result<Vec<Authority>, ServiceError>;
    async fn health_check(&self) -> Result<(), ServiceError>;
}

/// PostgreSQL-backed authority store.
#[derive(Clone)]
pub struct PgAuthorityStore {
    pool: PgPool,
}

impl PgAuthorityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorityStore for PgAuthorityStore {
    async fn find_all(&self) -> Result<Vec<Authority>, ServiceError> {
        let authorities = sqlx::query_as::<_, Authority>("SELECT name FROM authorities")
            .fetch_all(&self.pool)
            .await?;
        Ok(authorities)
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-memory store for tests and local runs.
pub struct InMemoryAuthorityStore {
    authorities: Mutex<Vec<Authority>>,
    unavailable: AtomicBool,
    find_all_calls: AtomicUsize,
}

impl Default for InMemoryAuthorityStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryAuthorityStore {
    pub fn new(authorities: Vec<Authority>) -> Self {
        Self {
            authorities: Mutex::new(authorities),
            unavailable: AtomicBool::new(false),
            find_all_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_names(names: &[&str]) -> Self {
        Self::new(names.iter().map(|name| Authority::new(*name)).collect())
    }

    /// Make every subsequent call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `find_all` calls received, failed ones included.
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Result<Vec<Authority>, ServiceError> {
        let authorities = self.authorities.lock().map_err(|e| {
            ServiceError::StoreUnavailable(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })?;
        Ok(authorities.clone())
    }

    fn check_available(&self) -> Result<(), ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::StoreUnavailable(anyhow::anyhow!(
                "In-memory store marked unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AuthorityStore for InMemoryAuthorityStore {
    async fn find_all(&self) -> Result<Vec<Authority>, ServiceError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.snapshot()
    }

    async fn health_check(&self) -> Result<(), ServiceError> {
        self.check_available()
    }
}
