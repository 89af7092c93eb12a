//! Device-agnostic control sampling for the kart.
//!
//! Whatever drives the kart (keyboard, pad, replay, script) feeds raw
//! samples into [`InputState`] once per frame; the control core only ever
//! sees the resulting [`ControlSample`].

/// Edge-aware state of a digital button for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame.
    pub pressed: bool,
    /// Currently down.
    pub held: bool,
    /// Went up this frame.
    pub released: bool,
}

impl ButtonState {
    pub const IDLE: Self = Self {
        pressed: false,
        held: false,
        released: false,
    };
    pub const PRESSED: Self = Self {
        pressed: true,
        held: true,
        released: false,
    };
    pub const HELD: Self = Self {
        pressed: false,
        held: true,
        released: false,
    };
    pub const RELEASED: Self = Self {
        pressed: false,
        held: false,
        released: true,
    };
}

/// One frame of kart controls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlSample {
    /// Lateral intent in `[-1, 1]`, positive steers right, 0 is neutral.
    pub steer: f32,
    /// Accelerate is held.
    pub throttle: bool,
    /// Drift button edges.
    pub drift: ButtonState,
}

impl ControlSample {
    /// Build a sample, clamping `steer` into `[-1, 1]`.
    pub fn new(steer: f32, throttle: bool, drift: ButtonState) -> Self {
        Self {
            steer: clamp_steer(steer),
            throttle,
            drift,
        }
    }
}

fn clamp_steer(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(-1.0, 1.0)
}

/// Manages control state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    steer: f32,
    throttle_held: bool,
    drift_held: bool,
    drift_pressed: bool,
    drift_released: bool,
}

impl InputState {
    /// Create an input state with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.drift_pressed = false;
        self.drift_released = false;
    }

    /// Set the raw steer axis. Values outside `[-1, 1]` are clamped.
    pub fn set_steer(&mut self, value: f32) {
        let clamped = clamp_steer(value);
        if clamped != value {
            log::trace!("Steer {} clamped to {}", value, clamped);
        }
        self.steer = clamped;
    }

    /// Set whether accelerate is held.
    pub fn set_throttle(&mut self, held: bool) {
        self.throttle_held = held;
    }

    /// Process the raw drift button level for this frame.
    pub fn process_drift(&mut self, held: bool) {
        if held && !self.drift_held {
            self.drift_pressed = true;
        }
        if !held && self.drift_held {
            self.drift_released = true;
        }
        self.drift_held = held;
    }

    /// Current steer value.
    pub fn steer(&self) -> f32 {
        self.steer
    }

    /// Snapshot the controls for this frame.
    pub fn sample(&self) -> ControlSample {
        ControlSample {
            steer: self.steer,
            throttle: self.throttle_held,
            drift: ButtonState {
                pressed: self.drift_pressed,
                held: self.drift_held,
                released: self.drift_released,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_edges_fire_for_one_frame() {
        let mut input = InputState::new();

        input.begin_frame();
        input.process_drift(true);
        assert_eq!(input.sample().drift, ButtonState::PRESSED);

        input.begin_frame();
        input.process_drift(true);
        assert_eq!(input.sample().drift, ButtonState::HELD);

        input.begin_frame();
        input.process_drift(false);
        assert_eq!(input.sample().drift, ButtonState::RELEASED);

        input.begin_frame();
        input.process_drift(false);
        assert_eq!(input.sample().drift, ButtonState::IDLE);
    }

    #[test]
    fn steer_is_clamped_into_range() {
        let mut input = InputState::new();
        input.set_steer(1.7);
        assert_eq!(input.steer(), 1.0);
        input.set_steer(-3.0);
        assert_eq!(input.steer(), -1.0);
        input.set_steer(f32::NAN);
        assert_eq!(input.steer(), 0.0);
        assert_eq!(ControlSample::new(2.0, true, ButtonState::IDLE).steer, 1.0);
    }

    #[test]
    fn throttle_is_a_level_not_an_edge() {
        let mut input = InputState::new();
        input.set_throttle(true);
        input.begin_frame();
        assert!(input.sample().throttle);
    }
}
