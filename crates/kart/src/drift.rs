//! Drift lifecycle: start, charge accumulation, tiers, release.
//!
//! A drift locks its direction when it starts. Every tick while it lasts the
//! steer input is read on the counter-steer axis (`+1` = steering fully away
//! from the drift, `-1` = fully into it): counter-steering earns more charge
//! but tightens the turn less. Charge unlocks tiers at fixed thresholds, and
//! releasing with a tier earns a boost.

use engine_core::remap;

use crate::boost::BoostRequest;
use crate::config::{BoostTuning, DriftTuning};
use crate::events::KartEvent;

/// Highest drift tier.
pub const MAX_TIER: u8 = 3;

/// Side the kart slides toward, captured when the drift starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftDirection {
    Left,
    Right,
}

impl DriftDirection {
    /// Direction for a non-zero steer value.
    pub fn from_steer(steer: f32) -> Option<Self> {
        if steer > 0.0 {
            Some(Self::Right)
        } else if steer < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// `1.0` for right, `-1.0` for left.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Steer remapped so `+1` is full counter-steer and `-1` is fully into the drift.
    pub fn counter_steer(self, steer: f32) -> f32 {
        -steer * self.sign()
    }
}

/// Bookkeeping for the drift in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrift {
    pub direction: DriftDirection,
    pub charge: f32,
    pub tier: u8,
    /// Bit `n - 1` set once `TierReached(n)` has fired.
    notified_tiers: u8,
}

impl ActiveDrift {
    fn new(direction: DriftDirection) -> Self {
        Self {
            direction,
            charge: 0.0,
            tier: 0,
            notified_tiers: 0,
        }
    }

    /// Whether `TierReached(tier)` has already fired for this drift.
    pub fn was_notified(&self, tier: u8) -> bool {
        tier > 0 && self.notified_tiers & (1 << (tier - 1)) != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DriftState {
    #[default]
    Idle,
    Drifting(ActiveDrift),
}

/// Result of one drifting tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftTick {
    pub direction: DriftDirection,
    /// Steering multiplier applied in the drift direction.
    pub turn_control: f32,
    /// Charge added this tick.
    pub charge_gained: f32,
}

/// Tier earned by `charge` given ascending `thresholds`.
pub fn tier_for_charge(charge: f32, thresholds: &[f32; 3]) -> u8 {
    thresholds.iter().filter(|&&t| charge >= t).count() as u8
}

/// Owns the drift state and emits its lifecycle events.
#[derive(Debug, Clone)]
pub struct DriftStateMachine {
    drift: DriftTuning,
    boost: BoostTuning,
    state: DriftState,
}

impl DriftStateMachine {
    /// Create an idle state machine.
    pub fn new(drift: DriftTuning, boost: BoostTuning) -> Self {
        Self {
            drift,
            boost,
            state: DriftState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DriftState {
        &self.state
    }

    /// The drift in progress, if any.
    pub fn active(&self) -> Option<&ActiveDrift> {
        match &self.state {
            DriftState::Drifting(drift) => Some(drift),
            DriftState::Idle => None,
        }
    }

    /// Check if a drift is in progress.
    pub fn is_drifting(&self) -> bool {
        self.active().is_some()
    }

    /// Direction of the drift in progress.
    pub fn direction(&self) -> Option<DriftDirection> {
        self.active().map(|d| d.direction)
    }

    /// Accumulated charge, 0 when idle.
    pub fn charge(&self) -> f32 {
        self.active().map_or(0.0, |d| d.charge)
    }

    /// Tier reached so far, 0 when idle.
    pub fn tier(&self) -> u8 {
        self.active().map_or(0, |d| d.tier)
    }

    /// Drift button went down. Starts a drift when idle and steering;
    /// otherwise does nothing. Returns whether a drift started.
    pub fn press(&mut self, steer: f32, events: &mut Vec<KartEvent>) -> bool {
        if self.is_drifting() {
            return false;
        }
        let Some(direction) = DriftDirection::from_steer(steer) else {
            return false;
        };

        self.state = DriftState::Drifting(ActiveDrift::new(direction));
        log::debug!("Drift started {:?}", direction);
        events.push(KartEvent::DriftStarted { direction });
        true
    }

    /// Accumulate charge for a tick of `dt` seconds. Returns `None` when idle.
    pub fn tick(&mut self, steer: f32, dt: f32, events: &mut Vec<KartEvent>) -> Option<DriftTick> {
        let direction = self.direction()?;
        let counter = direction.counter_steer(steer);

        let turn_control = remap(
            counter,
            -1.0,
            1.0,
            self.drift.max_turn_control,
            self.drift.min_turn_control,
        );
        let per_tick = remap(
            counter,
            -1.0,
            1.0,
            self.drift.min_charge_per_tick,
            self.drift.max_charge_per_tick,
        );
        let charge_gained = per_tick.max(0.0) * dt * self.drift.reference_hz;
        self.accumulate(charge_gained, events);

        Some(DriftTick {
            direction,
            turn_control,
            charge_gained,
        })
    }

    /// Add charge and fire every newly reached tier, lowest first.
    fn accumulate(&mut self, amount: f32, events: &mut Vec<KartEvent>) {
        let thresholds = self.drift.tier_thresholds;
        let DriftState::Drifting(drift) = &mut self.state else {
            return;
        };

        let previous_tier = drift.tier;
        drift.charge += amount.max(0.0);
        let reached = tier_for_charge(drift.charge, &thresholds).max(drift.tier);

        for tier in (drift.tier + 1)..=reached {
            if drift.was_notified(tier) {
                continue;
            }
            drift.notified_tiers |= 1 << (tier - 1);
            log::debug!("Drift tier {} at charge {:.1}", tier, drift.charge);
            events.push(KartEvent::TierReached {
                tier,
                color_index: (tier - 1) as usize,
            });
        }
        drift.tier = reached;

        debug_assert!(drift.charge >= 0.0, "drift charge went negative");
        debug_assert!(drift.tier >= previous_tier, "drift tier decreased");
        debug_assert!(drift.tier <= MAX_TIER);
    }

    /// Drift button went up. Ends the drift, granting a boost for tier 1+.
    pub fn release(&mut self, events: &mut Vec<KartEvent>) -> Option<BoostRequest> {
        let drift = *self.active()?;
        self.state = DriftState::Idle;

        let boost = BoostRequest::for_tier(drift.tier, &self.boost);
        if let Some(request) = boost {
            log::debug!(
                "Drift released at tier {} (charge {:.1}), boost x{} for {:.2}s",
                drift.tier,
                drift.charge,
                request.multiplier,
                request.duration_seconds
            );
            events.push(KartEvent::BoostGranted {
                tier: request.tier,
                multiplier: request.multiplier,
                ramp_duration_seconds: request.duration_seconds,
                chromatic_pulse_seconds: self.boost.chromatic_rise + self.boost.chromatic_fall,
            });
        } else {
            log::debug!("Drift released without a tier (charge {:.1})", drift.charge);
        }
        events.push(KartEvent::DriftEnded);
        boost
    }

    /// End the drift without a boost (kart left the ground, got hit, race reset...).
    pub fn cancel(&mut self, events: &mut Vec<KartEvent>) -> bool {
        if !self.is_drifting() {
            return false;
        }
        self.state = DriftState::Idle;
        log::debug!("Drift cancelled");
        events.push(KartEvent::DriftEnded);
        true
    }
}
