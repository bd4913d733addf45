pub mod exporter;

use crate::profile::ProfileName;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct DecisionMetrics {
    classifications: Arc<AtomicU64>,
    invalid_identities: Arc<AtomicU64>,
    attestation_checks: Arc<AtomicU64>,
    attestation_blocks: Arc<AtomicU64>,
    features_hidden: Arc<AtomicU64>,
    prop_write_failures: Arc<AtomicU64>,
    profiles_applied: Arc<DashMap<ProfileName, u64>>,
    start_time: Instant,
}

impl DecisionMetrics {
    pub fn new() -> Self {
        Self {
            classifications: Arc::new(AtomicU64::new(0)),
            invalid_identities: Arc::new(AtomicU64::new(0)),
            attestation_checks: Arc::new(AtomicU64::new(0)),
            attestation_blocks: Arc::new(AtomicU64::new(0)),
            features_hidden: Arc::new(AtomicU64::new(0)),
            prop_write_failures: Arc::new(AtomicU64::new(0)),
            profiles_applied: Arc::new(DashMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn record_classification(&self) {
        self.classifications.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_identity(&self) {
        self.invalid_identities.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attestation_check(&self, blocked: bool) {
        self.attestation_checks.fetch_add(1, Ordering::Relaxed);
        if blocked {
            self.attestation_blocks.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_feature_hidden(&self) {
        self.features_hidden.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_profile_applied(&self, profile: ProfileName, failures: usize) {
        *self.profiles_applied.entry(profile).or_insert(0) += 1;
        self.prop_write_failures
            .fetch_add(failures as u64, Ordering::Relaxed);
    }

    // Getters for metrics
    pub fn get_classifications(&self) -> u64 {
        self.classifications.load(Ordering::Relaxed)
    }

    pub fn get_invalid_identities(&self) -> u64 {
        self.invalid_identities.load(Ordering::Relaxed)
    }

    pub fn get_attestation_checks(&self) -> u64 {
        self.attestation_checks.load(Ordering::Relaxed)
    }

    pub fn get_attestation_blocks(&self) -> u64 {
        self.attestation_blocks.load(Ordering::Relaxed)
    }

    pub fn get_features_hidden(&self) -> u64 {
        self.features_hidden.load(Ordering::Relaxed)
    }

    pub fn get_prop_write_failures(&self) -> u64 {
        self.prop_write_failures.load(Ordering::Relaxed)
    }

    pub fn get_profile_count(&self, profile: ProfileName) -> u64 {
        self.profiles_applied
            .get(&profile)
            .map(|count| *count)
            .unwrap_or(0)
    }

    /// Sorted copy so exports are stable.
    pub fn get_profiles_applied(&self) -> BTreeMap<ProfileName, u64> {
        self.profiles_applied
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }

    pub fn get_uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for DecisionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
