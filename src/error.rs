use crate::profile::PropKey;
use thiserror::Error;

/// Errors produced by the policy engine and its host hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Identity is missing a field; classification is skipped.
    #[error("invalid caller identity: {field} is empty")]
    InvalidIdentity { field: &'static str },

    /// Attestation refused by policy. Hosts surface this as an unsupported operation.
    #[error("attestation blocked (gms_unstable={gms_unstable}, store_package={store_package})")]
    BlockedOperation {
        gms_unstable: bool,
        store_package: bool,
    },
}

/// Per-field failure while writing a profile into the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("prop {key} is read-only")]
    ReadOnly { key: PropKey },

    #[error("failed to set prop {key}: {reason}")]
    Rejected { key: PropKey, reason: String },

    #[error("prop store lock poisoned")]
    Poisoned,
}
