//! Notifications emitted by the control core for the presentation layer.
//!
//! Events are queued during a tick and drained by the owner afterwards, so a
//! consumer can never re-enter the core while it is mutating drift state.

use crate::drift::DriftDirection;

/// Something presentation code (particles, camera, post-processing) reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KartEvent {
    /// A drift began in `direction`.
    DriftStarted { direction: DriftDirection },
    /// Drift charge crossed a tier threshold for the first time this drift.
    /// `color_index` selects the tier's flash colour (`tier - 1`).
    TierReached { tier: u8, color_index: usize },
    /// A drift was released with at least tier 1.
    BoostGranted {
        tier: u8,
        multiplier: f32,
        ramp_duration_seconds: f32,
        chromatic_pulse_seconds: f32,
    },
    /// The drift is over (released or cancelled).
    DriftEnded,
}
