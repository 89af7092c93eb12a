//! Surface alignment of the kart body against the ground below it.

use engine_core::{yaw_rotation, Quat, Vec3};

/// Results of the two downward probes for one physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GroundProbes {
    /// Normal under the short probe, if it hit.
    pub contact: Option<Vec3>,
    /// Normal under the long probe, if it hit.
    pub align: Option<Vec3>,
}

/// Up-normal proxy that eases toward the surface normal.
///
/// When the long probe finds nothing the proxy keeps its last orientation.
#[derive(Debug, Clone)]
pub struct GroundAlignment {
    up: Vec3,
    rate: f32,
    grounded: bool,
}

impl GroundAlignment {
    /// Start flat and airborne, easing at `rate` per second.
    pub fn new(rate: f32) -> Self {
        Self {
            up: Vec3::Y,
            rate,
            grounded: false,
        }
    }

    /// Apply one tick of probe results.
    pub fn update(&mut self, probes: GroundProbes, dt: f32) {
        self.grounded = probes.contact.is_some();
        let Some(normal) = probes.align else {
            return;
        };
        let t = (dt * self.rate).clamp(0.0, 1.0);
        self.up = self.up.lerp(normal, t).try_normalize().unwrap_or(self.up);
    }

    /// Current up-normal.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Whether the short probe touched ground on the last update.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Tilt to the up-normal, then re-apply the chassis heading on top.
    pub fn orientation(&self, yaw_degrees: f32) -> Quat {
        Quat::from_rotation_arc(Vec3::Y, self.up) * yaw_rotation(yaw_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slope() -> Vec3 {
        Vec3::new(0.0, 1.0, 0.5).normalize()
    }

    #[test]
    fn eases_toward_the_slope_normal() {
        let mut ground = GroundAlignment::new(8.0);
        let probes = GroundProbes {
            contact: Some(slope()),
            align: Some(slope()),
        };
        ground.update(probes, 1.0 / 50.0);
        let first = ground.up().angle_between(slope());
        assert!(first > 0.0 && first < Vec3::Y.angle_between(slope()));

        for _ in 0..100 {
            ground.update(probes, 1.0 / 50.0);
        }
        assert!(ground.up().angle_between(slope()) < 1e-3);
        assert!(ground.is_grounded());
    }

    #[test]
    fn both_probes_missing_keeps_last_orientation() {
        let mut ground = GroundAlignment::new(8.0);
        let probes = GroundProbes {
            contact: Some(slope()),
            align: Some(slope()),
        };
        for _ in 0..10 {
            ground.update(probes, 1.0 / 50.0);
        }
        let before = ground.up();
        let tilted = ground.orientation(30.0);

        ground.update(GroundProbes::default(), 1.0 / 50.0);
        assert_eq!(ground.up(), before);
        assert_ne!(ground.up(), Vec3::Y);
        assert!(ground.orientation(30.0).abs_diff_eq(tilted, 1e-6));
        assert!(!ground.is_grounded());
    }

    #[test]
    fn long_probe_alone_still_aligns_but_is_not_grounded() {
        let mut ground = GroundAlignment::new(8.0);
        ground.update(
            GroundProbes {
                contact: None,
                align: Some(slope()),
            },
            1.0 / 50.0,
        );
        assert!(!ground.is_grounded());
        assert_ne!(ground.up(), Vec3::Y);
    }

    #[test]
    fn orientation_keeps_heading_on_flat_ground() {
        let ground = GroundAlignment::new(8.0);
        let forward = ground.orientation(90.0) * -Vec3::Z;
        assert!((forward - Vec3::X).length() < 1e-5);
    }
}
