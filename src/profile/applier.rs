use crate::error::ApplyError;
use crate::profile::{DeviceProfile, ProfileName, PropKey};
use std::collections::{BTreeMap, HashSet};
use std::sync::RwLock;
use tracing::{debug, error};

/// Host capability that writes one identity property into the running process.
pub trait ProfileApplier: Send + Sync {
    fn set_prop(&self, key: PropKey, value: &str) -> Result<(), ApplyError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropOutcome {
    pub key: PropKey,
    pub result: Result<(), ApplyError>,
}

/// Per-key results of one profile application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub profile: ProfileName,
    pub outcomes: Vec<PropOutcome>,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PropOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Writes every prop of `profile`, continuing past failures.
pub fn apply_profile(applier: &dyn ProfileApplier, profile: &DeviceProfile) -> ApplyReport {
    let outcomes = profile
        .props
        .iter()
        .map(|(key, value)| {
            debug!("Setting prop {} to {}", key, value);
            let result = applier.set_prop(*key, value);
            if let Err(ref e) = result {
                error!(prop = %key, error = %e, "Failed to set prop {}", key);
            }
            PropOutcome { key: *key, result }
        })
        .collect();

    ApplyReport {
        profile: profile.name,
        outcomes,
    }
}

/// In-memory stand-in for the host's device identity fields.
#[derive(Debug, Default)]
pub struct PropStore {
    props: RwLock<BTreeMap<PropKey, String>>,
    read_only: HashSet<PropKey>,
}

impl PropStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with the real device values.
    pub fn with_props<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = (PropKey, S)>,
        S: Into<String>,
    {
        Self {
            props: RwLock::new(props.into_iter().map(|(k, v)| (k, v.into())).collect()),
            read_only: HashSet::new(),
        }
    }

    pub fn read_only(mut self, key: PropKey) -> Self {
        self.read_only.insert(key);
        self
    }

    pub fn get(&self, key: PropKey) -> Option<String> {
        self.props.read().ok()?.get(&key).cloned()
    }

    pub fn snapshot(&self) -> BTreeMap<PropKey, String> {
        self.props
            .read()
            .map(|props| props.clone())
            .unwrap_or_default()
    }
}

impl ProfileApplier for PropStore {
    fn set_prop(&self, key: PropKey, value: &str) -> Result<(), ApplyError> {
        if self.read_only.contains(&key) {
            return Err(ApplyError::ReadOnly { key });
        }
        let mut props = self.props.write().map_err(|_| ApplyError::Poisoned)?;
        props.insert(key, value.to_string());
        Ok(())
    }
}
