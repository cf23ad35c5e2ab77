//! Current user profile
//!
//! A validated input merged with the metrics derived from it. Exactly one profile is
//! live at a time; each submission replaces it wholesale.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::biometrics::BiometricInput;
use super::metrics::MetricsResult;

/// Input and metrics as one flat object
///
/// This is the object the chat collaborator sends as `metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub input: BiometricInput,
    #[serde(flatten)]
    pub metrics: MetricsResult,
    #[serde(rename = "computedAt", default = "Utc::now")]
    pub computed_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(input: BiometricInput, metrics: MetricsResult) -> Self {
        Self {
            input,
            metrics,
            computed_at: Utc::now(),
        }
    }
}

/// Holder of the single live profile snapshot
///
/// `publish` swaps the whole `Arc` under one write lock, so readers see either the
/// previous profile or the new one, never a mix.
#[derive(Debug, Default)]
pub struct ProfileStore {
    current: RwLock<Option<Arc<UserProfile>>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live profile, returning the published snapshot
    pub fn publish(&self, profile: UserProfile) -> Arc<UserProfile> {
        let snapshot = Arc::new(profile);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// The live profile, if any submission has succeeded yet
    pub fn current(&self) -> Option<Arc<UserProfile>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
