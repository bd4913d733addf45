// src/lib.rs

pub mod config;
pub mod error;
pub mod identity;
pub mod logger;
pub mod metrics;
pub mod policy;
pub mod profile;

pub use config::{ConfigError, SpoofConfig};
pub use error::{ApplyError, PolicyError};
pub use identity::{call_stack_has_attestation_marker, CallerIdentity};
pub use logger::{LogConfig, Logger};
pub use metrics::exporter::{ExporterType, MetricsExporter};
pub use metrics::DecisionMetrics;
pub use policy::{
    classify, filter_feature_presence, should_block_attestation, ClassificationResult,
    EngineState, PolicyEngine,
};
pub use profile::{
    apply_profile, ApplyReport, DeviceProfile, ProfileApplier, ProfileName, PropKey, PropOutcome,
    PropStore,
};
