//! Arcade kart control core.
//!
//! Turns steer/throttle/drift samples into a smoothed drive force and heading,
//! runs the tiered drift-charge state machine, and keeps the body aligned to
//! the ground. Presentation (particles, camera, post-processing) stays outside:
//! it drains [`KartEvent`]s and reads [`KartSnapshot`]s.

pub mod boost;
pub mod config;
pub mod controller;
pub mod drift;
pub mod events;
pub mod ground;
pub mod smoother;
pub mod visual;

pub use boost::{BoostRamp, BoostRequest, ChromaticPulse};
pub use config::{
    default_config_path, BoostTuning, ConfigError, DriftTuning, DriveTuning, GroundTuning,
    KartConfig, VisualTuning,
};
pub use controller::{KartController, KartSnapshot};
pub use drift::{ActiveDrift, DriftDirection, DriftState, DriftStateMachine, DriftTick, MAX_TIER};
pub use events::KartEvent;
pub use ground::{GroundAlignment, GroundProbes};
pub use smoother::ControlSmoother;
pub use visual::VisualModel;
