//! Scripted driver: timed control cues replayed into an `InputState`.

use input::InputState;
use rand::Rng;

/// Controls held from `at` seconds until the next cue.
#[derive(Debug, Clone, Copy)]
pub struct Cue {
    pub at: f32,
    pub steer: f32,
    pub throttle: bool,
    pub drift: bool,
}

const fn cue(at: f32, steer: f32, throttle: bool, drift: bool) -> Cue {
    Cue {
        at,
        steer,
        throttle,
        drift,
    }
}

/// Demo lap: a long counter-steered right drift into a tier 3 boost, a
/// sloppy left drift that never charges, then a run over the ramp.
const DEMO_LAP: &[Cue] = &[
    cue(0.0, 0.0, true, false),
    cue(2.0, 0.6, true, false),
    cue(2.5, 1.0, true, true),
    cue(2.6, -0.8, true, true),
    cue(5.6, 0.0, true, false),
    cue(7.0, -0.5, true, false),
    cue(7.3, -1.0, true, true),
    cue(8.5, 0.0, true, false),
    cue(11.0, 0.0, false, false),
    cue(13.0, 0.0, false, false),
];

pub struct Script {
    cues: &'static [Cue],
    steer_noise: f32,
}

impl Script {
    pub fn demo_lap() -> Self {
        Self {
            cues: DEMO_LAP,
            steer_noise: 0.05,
        }
    }

    /// Time of the final cue.
    pub fn duration(&self) -> f32 {
        self.cues.last().map_or(0.0, |c| c.at)
    }

    fn cue_at(&self, time: f32) -> Cue {
        self.cues
            .iter()
            .rev()
            .find(|c| c.at <= time)
            .copied()
            .unwrap_or(cue(0.0, 0.0, false, false))
    }

    /// Feed the controls for `time` into `input`. Non-neutral steer gets a
    /// little noise so the drift curves see uneven input.
    pub fn drive(&self, time: f32, input: &mut InputState, rng: &mut impl Rng) {
        let cue = self.cue_at(time);
        let steer = if cue.steer != 0.0 {
            cue.steer + rng.gen_range(-self.steer_noise..=self.steer_noise)
        } else {
            0.0
        };
        input.set_steer(steer);
        input.set_throttle(cue.throttle);
        input.process_drift(cue.drift);
    }
}
