//! Per-tick kart controller: input phase, then fixed physics phase.
//!
//! The owning loop calls [`KartController::sample_input`] once per frame and
//! [`KartController::step_physics`] for every fixed physics tick that follows,
//! then steps the [`PhysicsWorld`] and drains events for presentation.

use engine_core::{lerp, wrap_degrees, yaw_rotation, Quat, Transform, Vec3};
use input::ControlSample;
use physics::{PhysicsBody, PhysicsWorld};

use crate::boost::{BoostRamp, ChromaticPulse};
use crate::config::KartConfig;
use crate::drift::{DriftDirection, DriftStateMachine};
use crate::events::KartEvent;
use crate::ground::{GroundAlignment, GroundProbes};
use crate::smoother::ControlSmoother;
use crate::visual::VisualModel;

/// Read-only view of the kart for cameras, HUD and effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KartSnapshot {
    /// Chassis position (sphere center minus the chassis offset).
    pub position: Vec3,
    pub velocity: Vec3,
    pub current_speed: f32,
    pub current_turn_rate: f32,
    pub is_drifting: bool,
    pub drift_direction: Option<DriftDirection>,
    pub current_tier: u8,
    pub drift_charge: f32,
    pub boost_active: bool,
    /// Post-processing pulse intensity in `[0, 1]`.
    pub chromatic_intensity: f32,
    pub grounded: bool,
    /// Heading only.
    pub chassis_rotation: Quat,
    /// Heading tilted onto the ground normal.
    pub body_rotation: Quat,
    /// Body rotation plus the visual model's lean and drift swing.
    pub model_rotation: Quat,
}

pub struct KartController {
    config: KartConfig,
    body: PhysicsBody,
    smoother: ControlSmoother,
    drift: DriftStateMachine,
    visual: VisualModel,
    ground: GroundAlignment,
    boost: Option<BoostRamp>,
    chromatic: Option<ChromaticPulse>,
    chassis_position: Vec3,
    /// Chassis heading in degrees, clockwise from -Z.
    chassis_yaw: f32,
    /// One-tick impulses, consumed by the smoother every frame.
    requested_speed: f32,
    requested_turn_rate: f32,
    events: Vec<KartEvent>,
}

impl KartController {
    /// Create a kart whose rolling sphere is centred at `position`, facing `yaw_degrees`.
    pub fn spawn(world: &mut PhysicsWorld, position: Vec3, yaw_degrees: f32, config: KartConfig) -> Self {
        let body = world.add_kart_sphere(
            position,
            config.drive.sphere_radius,
            config.drive.linear_damping,
        );
        log::debug!("Spawned kart at {:?} facing {:.1}°", position, yaw_degrees);

        Self {
            smoother: ControlSmoother::from_tuning(&config.drive),
            drift: DriftStateMachine::new(config.drift.clone(), config.boost.clone()),
            visual: VisualModel::new(config.visual.clone()),
            ground: GroundAlignment::new(config.ground.align_rate),
            boost: None,
            chromatic: None,
            chassis_position: position - Vec3::Y * config.ground.chassis_offset,
            chassis_yaw: wrap_degrees(yaw_degrees),
            requested_speed: 0.0,
            requested_turn_rate: 0.0,
            events: Vec::new(),
            body,
            config,
        }
    }

    /// Remove the kart's body from the world.
    pub fn despawn(self, world: &mut PhysicsWorld) {
        world.remove_body(self.body.rigid_body);
    }

    /// Input phase: run once per frame with the frame's `dt`.
    pub fn sample_input(&mut self, sample: &ControlSample, world: &PhysicsWorld, dt: f32) {
        if let Some(center) = world.body_position(self.body.rigid_body) {
            self.chassis_position = center - Vec3::Y * self.config.ground.chassis_offset;
        }

        let steer = sample.steer;
        if sample.throttle {
            self.requested_speed = self.config.drive.acceleration;
        }
        if steer != 0.0 {
            self.requested_turn_rate = self.config.drive.steering * steer;
        }

        if sample.drift.pressed {
            self.drift.press(steer, &mut self.events);
        }

        if let Some(tick) = self.drift.tick(steer, dt, &mut self.events) {
            self.requested_turn_rate =
                self.config.drive.steering * tick.direction.sign() * tick.turn_control;
        }

        if sample.drift.released && self.drift.is_drifting() {
            self.release_drift();
        }

        self.smoother
            .update(self.requested_speed, self.requested_turn_rate, dt);
        self.requested_speed = 0.0;
        self.requested_turn_rate = 0.0;

        if let Some(ramp) = &mut self.boost {
            self.smoother.override_speed(ramp.advance(dt));
            if ramp.is_finished() {
                self.boost = None;
            }
        }
        if let Some(pulse) = &mut self.chromatic {
            pulse.advance(dt);
            if pulse.is_finished() {
                self.chromatic = None;
            }
        }

        match self.drift.direction() {
            Some(direction) => {
                self.visual
                    .follow_drift(direction, direction.counter_steer(steer), dt)
            }
            None => self.visual.follow_steer(steer, dt),
        }
    }

    fn release_drift(&mut self) {
        if let Some(request) = self.drift.release(&mut self.events) {
            let base_speed = self.smoother.current_speed();
            log::info!(
                "Boost tier {}: x{} from speed {:.1} over {:.2}s",
                request.tier,
                request.multiplier,
                base_speed,
                request.duration_seconds
            );
            self.boost = Some(BoostRamp::new(request, base_speed));
            self.chromatic = Some(ChromaticPulse::new(&self.config.boost));
        }
        self.visual.begin_settle();
    }

    /// End the current drift without a boost. No-op when not drifting.
    pub fn cancel_drift(&mut self) {
        if self.drift.cancel(&mut self.events) {
            self.visual.begin_settle();
        }
    }

    /// Physics phase: run once per fixed tick, before stepping the world.
    pub fn step_physics(&mut self, world: &mut PhysicsWorld, dt: f32) {
        let handle = self.body.rigid_body;
        let drive = self.drive_direction() * self.smoother.current_speed();
        world.apply_acceleration(handle, drive, dt);
        world.apply_acceleration(handle, Vec3::NEG_Y * self.config.drive.gravity, dt);

        let target = self.chassis_yaw + self.smoother.current_turn_rate();
        self.chassis_yaw = wrap_degrees(lerp(
            self.chassis_yaw,
            target,
            dt * self.config.drive.heading_rate,
        ));

        let ground = &self.config.ground;
        let origin = self.chassis_position + Vec3::Y * ground.probe_lift;
        let probes = GroundProbes {
            contact: world
                .raycast_ground(origin, ground.contact_probe)
                .map(|hit| hit.normal),
            align: world
                .raycast_ground(origin, ground.align_probe)
                .map(|hit| hit.normal),
        };
        self.ground.update(probes, dt);
    }

    /// Drive direction: the flat chassis heading while drifting, the
    /// ground-aligned model's forward otherwise.
    pub fn drive_direction(&self) -> Vec3 {
        let rotation = if self.drift.is_drifting() {
            yaw_rotation(self.chassis_yaw)
        } else {
            self.model_rotation()
        };
        rotation * Vec3::NEG_Z
    }

    /// Ground-aligned body rotation with the visual lean and swing on top.
    fn model_rotation(&self) -> Quat {
        self.ground.orientation(self.chassis_yaw) * yaw_rotation(self.visual.yaw_offset())
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, KartEvent> {
        self.events.drain(..)
    }

    /// Chassis position and heading, without ground tilt.
    pub fn chassis(&self) -> Transform {
        Transform::from_position_yaw(self.chassis_position, self.chassis_yaw)
    }

    /// Smoothed speed after any boost override.
    pub fn current_speed(&self) -> f32 {
        self.smoother.current_speed()
    }

    /// Smoothed turn rate, degrees.
    pub fn current_turn_rate(&self) -> f32 {
        self.smoother.current_turn_rate()
    }

    /// Check if a drift is in progress.
    pub fn is_drifting(&self) -> bool {
        self.drift.is_drifting()
    }

    /// Drift tier reached so far, 0 when not drifting.
    pub fn current_tier(&self) -> u8 {
        self.drift.tier()
    }

    /// Read-only view for presentation.
    pub fn snapshot(&self, world: &PhysicsWorld) -> KartSnapshot {
        let body_rotation = self.ground.orientation(self.chassis_yaw);
        KartSnapshot {
            position: self.chassis_position,
            velocity: world
                .body_velocity(self.body.rigid_body)
                .unwrap_or(Vec3::ZERO),
            current_speed: self.current_speed(),
            current_turn_rate: self.current_turn_rate(),
            is_drifting: self.is_drifting(),
            drift_direction: self.drift.direction(),
            current_tier: self.current_tier(),
            drift_charge: self.drift.charge(),
            boost_active: self.boost.is_some(),
            chromatic_intensity: self.chromatic.map_or(0.0, |p| p.intensity()),
            grounded: self.ground.is_grounded(),
            chassis_rotation: yaw_rotation(self.chassis_yaw),
            body_rotation,
            model_rotation: self.model_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::ButtonState;

    const DT: f32 = 1.0 / 60.0;

    fn track() -> (PhysicsWorld, KartController) {
        let mut world = PhysicsWorld::new();
        world.set_timestep(DT);
        world.add_ground_plane();
        let kart = KartController::spawn(&mut world, Vec3::new(0.0, 0.5, 0.0), 0.0, KartConfig::default());
        world.update_query_pipeline();
        (world, kart)
    }

    fn frame(world: &mut PhysicsWorld, kart: &mut KartController, sample: ControlSample) -> Vec<KartEvent> {
        kart.sample_input(&sample, world, DT);
        kart.step_physics(world, DT);
        world.step();
        kart.drain_events().collect()
    }

    #[test]
    fn throttle_drives_the_kart_forward() {
        let (mut world, mut kart) = track();
        for _ in 0..120 {
            frame(&mut world, &mut kart, ControlSample::new(0.0, true, ButtonState::IDLE));
        }
        let snapshot = kart.snapshot(&world);
        assert!((snapshot.current_speed - 30.0).abs() < 0.5);
        assert!(snapshot.position.z < -2.0, "kart should move along -Z, z = {}", snapshot.position.z);
        assert!(snapshot.position.x.abs() < 1e-3);
        assert!(snapshot.grounded);
    }

    #[test]
    fn steering_turns_the_chassis_right() {
        let (mut world, mut kart) = track();
        for _ in 0..10 {
            frame(&mut world, &mut kart, ControlSample::new(1.0, true, ButtonState::IDLE));
        }
        assert!(kart.current_turn_rate() > 0.0);
        assert!(kart.chassis().forward().x > 0.1);
    }

    #[test]
    fn drive_direction_follows_model_when_idle_and_chassis_when_drifting() {
        let (world, mut kart) = track();
        for _ in 0..30 {
            kart.sample_input(&ControlSample::new(1.0, false, ButtonState::IDLE), &world, DT);
        }
        let chassis_forward = kart.chassis().forward();
        let drive = kart.drive_direction();
        assert!(drive.x > chassis_forward.x, "model leans right of the chassis");

        let sample = ControlSample::new(1.0, false, ButtonState::PRESSED);
        kart.sample_input(&sample, &world, DT);
        assert!(kart.is_drifting());
        assert!((kart.drive_direction() - kart.chassis().forward()).length() < 1e-5);
    }

    #[test]
    fn full_drift_emits_lifecycle_in_order_and_boosts() {
        let (mut world, mut kart) = track();
        for _ in 0..60 {
            frame(&mut world, &mut kart, ControlSample::new(0.0, true, ButtonState::IDLE));
        }

        let mut events = frame(&mut world, &mut kart, ControlSample::new(1.0, true, ButtonState::PRESSED));
        for _ in 0..170 {
            events.extend(frame(&mut world, &mut kart, ControlSample::new(-1.0, true, ButtonState::HELD)));
        }
        assert_eq!(kart.current_tier(), 3);
        let speed_before = kart.current_speed();

        events.extend(frame(&mut world, &mut kart, ControlSample::new(-1.0, true, ButtonState::RELEASED)));

        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                KartEvent::DriftStarted { .. } => "start",
                KartEvent::TierReached { .. } => "tier",
                KartEvent::BoostGranted { .. } => "boost",
                KartEvent::DriftEnded => "end",
            })
            .collect();
        assert_eq!(kinds, vec!["start", "tier", "tier", "tier", "boost", "end"]);
        assert_eq!(
            events[0],
            KartEvent::DriftStarted { direction: DriftDirection::Right }
        );

        let snapshot = kart.snapshot(&world);
        assert!(!snapshot.is_drifting);
        assert_eq!(snapshot.current_tier, 0);
        assert_eq!(snapshot.drift_charge, 0.0);
        assert!(snapshot.boost_active);
        assert!(snapshot.chromatic_intensity > 0.0);
        assert!(snapshot.current_speed > speed_before * 2.0);

        // The boost decays back to normal driving.
        for _ in 0..90 {
            frame(&mut world, &mut kart, ControlSample::new(0.0, true, ButtonState::IDLE));
        }
        let snapshot = kart.snapshot(&world);
        assert!(!snapshot.boost_active);
        assert!((snapshot.current_speed - 30.0).abs() < 1.0);
    }

    #[test]
    fn idle_drive_direction_follows_the_tilted_model_on_a_ramp() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(DT);
        world.add_static_cuboid(
            Vec3::ZERO,
            Quat::from_rotation_x(12f32.to_radians()),
            Vec3::new(20.0, 1.0, 20.0),
        );
        let mut kart = KartController::spawn(&mut world, Vec3::new(0.0, 2.0, 0.0), 0.0, KartConfig::default());
        world.update_query_pipeline();

        for _ in 0..55 {
            frame(&mut world, &mut kart, ControlSample::default());
        }
        for _ in 0..5 {
            frame(&mut world, &mut kart, ControlSample::new(0.3, false, ButtonState::IDLE));
        }

        let snapshot = kart.snapshot(&world);
        let up = snapshot.body_rotation * Vec3::Y;
        assert!(up.z > 0.1, "body should tilt with the ramp, up = {:?}", up);
        assert!(!snapshot.model_rotation.abs_diff_eq(snapshot.body_rotation, 1e-4));

        let drive = kart.drive_direction();
        let model_forward = snapshot.model_rotation * Vec3::NEG_Z;
        assert!((drive - model_forward).length() < 1e-5, "drive {:?} model {:?}", drive, model_forward);
        assert!(drive.y > 0.1, "drive should climb the ramp, drive = {:?}", drive);
    }

    #[test]
    fn drifting_drive_direction_stays_flat_on_a_ramp() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(DT);
        world.add_static_cuboid(
            Vec3::ZERO,
            Quat::from_rotation_x(12f32.to_radians()),
            Vec3::new(20.0, 1.0, 20.0),
        );
        let mut kart = KartController::spawn(&mut world, Vec3::new(0.0, 2.0, 0.0), 0.0, KartConfig::default());
        world.update_query_pipeline();

        for _ in 0..60 {
            frame(&mut world, &mut kart, ControlSample::default());
        }
        frame(&mut world, &mut kart, ControlSample::new(1.0, false, ButtonState::PRESSED));
        assert!(kart.is_drifting());
        let drive = kart.drive_direction();
        assert!(drive.y.abs() < 1e-5);
        assert!((drive - kart.chassis().forward()).length() < 1e-5);
    }

    #[test]
    fn drift_press_without_steer_is_ignored() {
        let (mut world, mut kart) = track();
        let events = frame(&mut world, &mut kart, ControlSample::new(0.0, true, ButtonState::PRESSED));
        assert!(events.is_empty());
        assert!(!kart.is_drifting());
    }

    #[test]
    fn cancel_ends_drift_without_boost() {
        let (mut world, mut kart) = track();
        frame(&mut world, &mut kart, ControlSample::new(-1.0, true, ButtonState::PRESSED));
        for _ in 0..80 {
            frame(&mut world, &mut kart, ControlSample::new(1.0, true, ButtonState::HELD));
        }
        assert_eq!(kart.current_tier(), 1);
        kart.drain_events().for_each(drop);

        kart.cancel_drift();
        let events: Vec<_> = kart.drain_events().collect();
        assert_eq!(events, vec![KartEvent::DriftEnded]);
        assert!(!kart.snapshot(&world).boost_active);
    }

    #[test]
    fn airborne_kart_keeps_its_ground_orientation() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(DT);
        let mut kart = KartController::spawn(&mut world, Vec3::new(0.0, 50.0, 0.0), 45.0, KartConfig::default());
        world.update_query_pipeline();

        let before = kart.snapshot(&world).body_rotation;
        for _ in 0..10 {
            frame(&mut world, &mut kart, ControlSample::default());
        }
        let snapshot = kart.snapshot(&world);
        assert!(!snapshot.grounded);
        assert!(snapshot.body_rotation.abs_diff_eq(before, 1e-6));
        assert!(snapshot.velocity.y < 0.0);
    }
}
