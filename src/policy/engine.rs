use crate::config::SpoofConfig;
use crate::error::PolicyError;
use crate::identity::{call_stack_has_attestation_marker, CallerIdentity};
use crate::metrics::DecisionMetrics;
use crate::policy::rules::{
    is_blocklisted_feature, PACKAGE_FINSKY, PACKAGE_GMS, PACKAGE_GPHOTOS, PROCESS_GMS_UNSTABLE,
    ROUTING_RULES,
};
use crate::policy::state::{EngineState, SharedState};
use crate::profile::{apply_profile, ApplyReport, DeviceProfile, ProfileApplier};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub profile_applied: Option<DeviceProfile>,
    pub updated_state: EngineState,
    pub rule_name: Option<&'static str>,
}

impl ClassificationResult {
    pub fn debug_summary(&self) -> String {
        format!(
            "profile: {:?}, rule: {:?}, state: {:?}",
            self.profile_applied.as_ref().map(|p| p.name),
            self.rule_name,
            self.updated_state
        )
    }
}

/// Chooses the profile for `identity`. Invalid identities leave `prior` untouched.
pub fn classify(
    identity: &CallerIdentity,
    config: &SpoofConfig,
    prior: EngineState,
) -> ClassificationResult {
    if let Err(e) = identity.validate() {
        debug!("Skipping classification: {}", e);
        return ClassificationResult {
            profile_applied: None,
            updated_state: prior,
            rule_name: None,
        };
    }

    let package = identity.package_name.as_str();
    let updated_state = EngineState {
        is_gms_unstable_process: package == PACKAGE_GMS
            && identity.process_name == PROCESS_GMS_UNSTABLE,
        is_store_package: package == PACKAGE_FINSKY,
        is_photos_spoof_target: config.spoof_google_apps && package == PACKAGE_GPHOTOS,
    };

    for rule in ROUTING_RULES {
        if rule.matches(identity, config) {
            debug!("🎯 Rule '{}' matched {}", rule.name, identity);
            return ClassificationResult {
                profile_applied: Some(rule.resolve(config)),
                updated_state,
                rule_name: Some(rule.name),
            };
        }
    }

    debug!("No routing rule matched {}, leaving identity untouched", identity);
    ClassificationResult {
        profile_applied: None,
        updated_state,
        rule_name: None,
    }
}

pub fn should_block_attestation(state: &EngineState, is_call_stack_from_attestation_library: bool) -> bool {
    (state.is_gms_unstable_process && is_call_stack_from_attestation_library) || state.is_store_package
}

pub fn filter_feature_presence(state: &EngineState, feature_name: &str, requested_default: bool) -> bool {
    if state.is_photos_spoof_target && requested_default && is_blocklisted_feature(feature_name) {
        return false;
    }
    requested_default
}

/// One engine per process: owns the configuration and the classification flags.
pub struct PolicyEngine {
    config: SpoofConfig,
    state: SharedState,
    metrics: DecisionMetrics,
}

impl PolicyEngine {
    pub fn new(config: SpoofConfig) -> Self {
        Self::with_metrics(config, DecisionMetrics::new())
    }

    pub fn with_metrics(config: SpoofConfig, metrics: DecisionMetrics) -> Self {
        Self {
            config,
            state: SharedState::new(),
            metrics,
        }
    }

    pub fn config(&self) -> &SpoofConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state.load()
    }

    pub fn metrics(&self) -> &DecisionMetrics {
        &self.metrics
    }

    /// Classifies and publishes the resulting flags.
    pub fn classify(&self, identity: &CallerIdentity) -> ClassificationResult {
        if identity.is_complete() {
            self.metrics.record_classification();
        } else {
            self.metrics.record_invalid_identity();
        }

        let result = classify(identity, &self.config, self.state.load());
        self.state.store(result.updated_state);
        result
    }

    pub fn on_process_identity_established(
        &self,
        package_name: Option<&str>,
        process_name: Option<&str>,
        applier: &dyn ProfileApplier,
    ) -> Option<ApplyReport> {
        let identity = CallerIdentity::from_parts(package_name, process_name);
        let result = self.classify(&identity);
        let profile = result.profile_applied?;

        info!(
            "🎭 Spoofing {} for {} via rule '{}'",
            profile.name,
            identity,
            result.rule_name.unwrap_or("unknown")
        );
        let report = apply_profile(applier, &profile);
        let failures = report.failures().count();
        if failures > 0 {
            warn!(
                "Profile {} partially applied: {}/{} props set",
                profile.name,
                report.applied_count(),
                profile.len()
            );
        }
        self.metrics.record_profile_applied(profile.name, failures);
        Some(report)
    }

    pub fn on_attestation_requested(&self, call_stack_contains_marker: bool) -> Result<(), PolicyError> {
        let state = self.state.load();
        let blocked = should_block_attestation(&state, call_stack_contains_marker);
        self.metrics.record_attestation_check(blocked);

        if blocked {
            info!(
                "🚫 Blocked key attestation gms_unstable={} store_package={}",
                state.is_gms_unstable_process, state.is_store_package
            );
            return Err(PolicyError::BlockedOperation {
                gms_unstable: state.is_gms_unstable_process,
                store_package: state.is_store_package,
            });
        }
        Ok(())
    }

    pub fn on_attestation_requested_with_stack<I, S>(&self, frames: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.on_attestation_requested(call_stack_has_attestation_marker(frames))
    }

    pub fn on_feature_queried(&self, feature_name: &str, requested_default: bool) -> bool {
        let present = filter_feature_presence(&self.state.load(), feature_name, requested_default);
        if present != requested_default {
            info!("Blocked system feature {} for photos", feature_name);
            self.metrics.record_feature_hidden();
        }
        present
    }

    pub fn debug_rules(&self) {
        info!("📋 Routing rules ({} total):", ROUTING_RULES.len());
        for (i, rule) in ROUTING_RULES.iter().enumerate() {
            info!(
                "  {}. {}: guard={:?} satisfied={}, profile={}",
                i + 1,
                rule.name,
                rule.guard,
                rule.guard.is_satisfied(&self.config),
                rule.profile
            );
        }
    }
}
