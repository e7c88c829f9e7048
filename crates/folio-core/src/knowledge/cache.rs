//! In-process knowledge snapshot cache.
//!
//! Holds exactly one current [`KnowledgeSnapshot`] behind an `Arc`. Readers
//! clone the pointer and never touch the store; `load` and `refresh` are
//! the only mutation points. The std `RwLock` guards nothing but the pointer
//! and is never held across an await. Refreshes are serialized by an async
//! mutex and coalesced: a caller that waited while another refresh
//! succeeded reuses that snapshot instead of querying the store again.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use folio_types::error::KnowledgeError;
use folio_types::knowledge::{KnowledgeSnapshot, SnapshotCounts, SnapshotOrigin};

use super::loader::KnowledgeLoader;
use super::repository::KnowledgeRepository;

/// Result of an operator-triggered refresh.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub snapshot: Arc<KnowledgeSnapshot>,
    /// True when this call reused a refresh that completed while it waited.
    pub coalesced: bool,
}

/// Admin-facing view of the cache.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub initialized: bool,
    pub loaded_at: DateTime<Utc>,
    pub origin: SnapshotOrigin,
    pub counts: SnapshotCounts,
    /// Number of successful loads since startup.
    pub generation: u64,
}

pub struct SnapshotCache<R: KnowledgeRepository> {
    loader: KnowledgeLoader<R>,
    current: RwLock<Arc<KnowledgeSnapshot>>,
    initialized: AtomicBool,
    generation: AtomicU64,
    refresh_lock: Mutex<()>,
}

impl<R: KnowledgeRepository> SnapshotCache<R> {
    /// Create an uninitialized cache holding the degraded snapshot.
    pub fn new(loader: KnowledgeLoader<R>) -> Self {
        let degraded = Arc::new(loader.degraded_snapshot());
        Self {
            loader,
            current: RwLock::new(degraded),
            initialized: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Initial population at startup. Never fails.
    ///
    /// On a store error the cache keeps whatever it holds (the degraded
    /// snapshot on a fresh cache) and the service runs in degraded mode.
    pub async fn load(&self) -> Arc<KnowledgeSnapshot> {
        let _guard = self.refresh_lock.lock().await;
        match self.loader.load().await {
            Ok(snapshot) => {
                let counts = snapshot.counts();
                info!(
                    skills = counts.skills,
                    experiences = counts.experiences,
                    projects = counts.projects,
                    certifications = counts.certifications,
                    "Knowledge base loaded"
                );
                self.install(snapshot);
            }
            Err(err) => {
                error!(
                    collection = %err.collection(),
                    error = %err,
                    "Knowledge base load failed, serving degraded snapshot"
                );
            }
        }
        self.initialized.store(true, Ordering::Release);
        self.snapshot()
    }

    /// The current snapshot. Never waits on I/O.
    pub fn get(&self) -> Arc<KnowledgeSnapshot> {
        if !self.initialized.load(Ordering::Acquire) {
            warn!("Knowledge cache read before initial load, serving degraded snapshot");
        }
        self.snapshot()
    }

    /// Reload from the store and swap the snapshot atomically.
    ///
    /// On failure the previous snapshot stays in place and the error is
    /// returned to the operator.
    pub async fn refresh(&self) -> Result<RefreshOutcome, KnowledgeError> {
        let observed = self.generation.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;

        if self.generation.load(Ordering::Acquire) != observed {
            info!("Knowledge refresh coalesced with a concurrent refresh");
            return Ok(RefreshOutcome {
                snapshot: self.snapshot(),
                coalesced: true,
            });
        }

        match self.loader.load().await {
            Ok(snapshot) => {
                let snapshot = self.install(snapshot);
                self.initialized.store(true, Ordering::Release);
                info!(loaded_at = %snapshot.loaded_at, "Knowledge base refreshed");
                Ok(RefreshOutcome {
                    snapshot,
                    coalesced: false,
                })
            }
            Err(err) => {
                warn!(
                    collection = %err.collection(),
                    error = %err,
                    "Knowledge refresh failed, keeping previous snapshot"
                );
                Err(err)
            }
        }
    }

    pub fn status(&self) -> CacheStatus {
        let snapshot = self.snapshot();
        CacheStatus {
            initialized: self.initialized.load(Ordering::Acquire),
            loaded_at: snapshot.loaded_at,
            origin: snapshot.origin,
            counts: snapshot.counts(),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    fn snapshot(&self) -> Arc<KnowledgeSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn install(&self, snapshot: KnowledgeSnapshot) -> Arc<KnowledgeSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        self.generation.fetch_add(1, Ordering::AcqRel);
        snapshot
    }
}
