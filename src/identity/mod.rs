use crate::error::PolicyError;
use serde::{Deserialize, Serialize};

/// Class-name fragment that marks a call as coming from the attestation library.
pub const ATTESTATION_STACK_MARKER: &str = "DroidGuard";

/// Package and process name of the calling application, captured once per process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub package_name: String,
    pub process_name: String,
}

impl CallerIdentity {
    pub fn new(package_name: impl Into<String>, process_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            process_name: process_name.into(),
        }
    }

    /// Many apps run a single process named after the package.
    pub fn single_process(package_name: impl Into<String>) -> Self {
        let package_name = package_name.into();
        Self {
            process_name: package_name.clone(),
            package_name,
        }
    }

    /// Builds an identity from values the host may not have been able to resolve.
    pub fn from_parts(package_name: Option<&str>, process_name: Option<&str>) -> Self {
        Self::new(package_name.unwrap_or_default(), process_name.unwrap_or_default())
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.package_name.is_empty() {
            return Err(PolicyError::InvalidIdentity { field: "package_name" });
        }
        if self.process_name.is_empty() {
            return Err(PolicyError::InvalidIdentity { field: "process_name" });
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.package_name, self.process_name)
    }
}

/// True when any frame's class name carries the attestation library marker.
pub fn call_stack_has_attestation_marker<I, S>(frames: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    frames
        .into_iter()
        .any(|frame| frame.as_ref().contains(ATTESTATION_STACK_MARKER))
}
