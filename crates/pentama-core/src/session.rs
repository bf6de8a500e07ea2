//! # Session Progress
//!
//! What the session layer stores about a user's progress, and how stored
//! progress is read back.
//!
//! A session may carry the detailed view, the flags only, or nothing. Readers
//! take the best available: the detailed view, else a reconstruction from the
//! flags (approximate), else the locked default.

use crate::cache::{DEFAULT_TTL, ProgressCache};
use crate::model::{Role, UserSnapshot};
use crate::progress::{GatingResult, ProgressFacade, SimpleProgress};
use serde::{Deserialize, Serialize};

/// Progress as persisted alongside a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub progress: Option<SimpleProgress>,
    pub detailed: Option<GatingResult>,
}

impl SessionProgress {
    /// Both views computed from one detailed result.
    #[must_use]
    pub fn from_detailed(detailed: GatingResult) -> Self {
        Self {
            progress: Some(detailed.to_simple()),
            detailed: Some(detailed),
        }
    }

    /// Best available detailed view.
    #[must_use]
    pub fn resolve_detailed(&self) -> GatingResult {
        match (self.detailed, self.progress) {
            (Some(detailed), _) => detailed,
            (None, Some(simple)) => ProgressFacade::reconstruct_detailed_from_simple(&simple),
            (None, None) => GatingResult::locked(),
        }
    }

    /// Stored flags, or all gates closed.
    #[must_use]
    pub fn resolve_simple(&self) -> SimpleProgress {
        self.progress.unwrap_or_default()
    }

    /// Whether the detailed view had to be approximated.
    #[must_use]
    pub fn is_reconstructed(&self) -> bool {
        self.detailed.is_none() && self.progress.is_some()
    }
}

/// Recomputes progress and keeps it in an injected cache.
pub struct ProgressTracker<C> {
    cache: C,
    ttl: u64,
}

impl<C: ProgressCache<String, SessionProgress>> ProgressTracker<C> {
    /// Create a tracker with the default TTL.
    #[must_use]
    pub fn new(cache: C) -> Self {
        Self {
            cache,
            ttl: DEFAULT_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = ttl;
        self
    }

    /// Compute both views for `user`, store them under `key` and return them.
    pub fn recalculate(&mut self, key: &str, user: &UserSnapshot, role: Role) -> SessionProgress {
        let session = SessionProgress::from_detailed(ProgressFacade::compute_detailed(user, role));
        self.cache.set(key.to_string(), session, self.ttl);
        tracing::debug!(key, %role, ttl = self.ttl, "session progress refreshed");
        session
    }

    /// Cached progress, if still live.
    pub fn lookup(&mut self, key: &str) -> Option<SessionProgress> {
        self.cache.get(&key.to_string())
    }

    /// Cached progress, or a fresh computation on miss.
    pub fn get_or_recalculate(
        &mut self,
        key: &str,
        user: &UserSnapshot,
        role: Role,
    ) -> SessionProgress {
        match self.lookup(key) {
            Some(session) => session,
            None => self.recalculate(key, user, role),
        }
    }

    pub fn invalidate(&mut self, key: &str) {
        self.cache.invalidate(&key.to_string());
    }

    #[must_use]
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }
}
