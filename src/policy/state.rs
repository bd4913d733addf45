use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Classification flags consulted by the attestation and feature hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub is_gms_unstable_process: bool,
    pub is_store_package: bool,
    pub is_photos_spoof_target: bool,
}

/// Process-wide cell for [`EngineState`]. Each flag is published independently.
#[derive(Debug, Default)]
pub struct SharedState {
    gms_unstable: AtomicBool,
    store_package: AtomicBool,
    photos_target: AtomicBool,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self) -> EngineState {
        EngineState {
            is_gms_unstable_process: self.gms_unstable.load(Ordering::Acquire),
            is_store_package: self.store_package.load(Ordering::Acquire),
            is_photos_spoof_target: self.photos_target.load(Ordering::Acquire),
        }
    }

    pub fn store(&self, state: EngineState) {
        self.gms_unstable
            .store(state.is_gms_unstable_process, Ordering::Release);
        self.store_package
            .store(state.is_store_package, Ordering::Release);
        self.photos_target
            .store(state.is_photos_spoof_target, Ordering::Release);
    }
}
