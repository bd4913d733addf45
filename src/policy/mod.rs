mod engine;
pub mod rules;
pub mod state;

pub use engine::{
    classify, filter_feature_presence, should_block_attestation, ClassificationResult, PolicyEngine,
};
pub use rules::{Guard, RoutingRule, Selector, FEATURE_BLOCKLIST, ROUTING_RULES};
pub use state::{EngineState, SharedState};
