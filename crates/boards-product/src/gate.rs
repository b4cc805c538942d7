//! # Feature Gate
//!
//! Whether the boards app exists at all is decided once, at construction,
//! from the host's `BoardsProduct` feature flag. Later configuration changes
//! are observed but never create or tear down the app; a flipped flag takes
//! effect on the next host restart.

use host_api::ConfigService;

/// Outcome of re-reading the flag after a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateObservation {
    /// The flag still matches the value captured at construction.
    Unchanged,
    /// The flag differs; the change applies after a restart.
    RestartRequired { now_enabled: bool },
}

/// Feature flag value captured at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureGate {
    enabled: bool,
}

impl FeatureGate {
    /// Read the flag from the host configuration.
    pub fn evaluate(config: &dyn ConfigService) -> bool {
        config.config().feature_flags.boards_product
    }

    /// Capture the flag.
    pub fn capture(config: &dyn ConfigService) -> Self {
        Self {
            enabled: Self::evaluate(config),
        }
    }

    /// Value captured at construction.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Re-read the flag and compare it with the captured value.
    pub fn observe(&self, config: &dyn ConfigService) -> GateObservation {
        let now_enabled = Self::evaluate(config);
        if now_enabled == self.enabled {
            GateObservation::Unchanged
        } else {
            GateObservation::RestartRequired { now_enabled }
        }
    }
}
