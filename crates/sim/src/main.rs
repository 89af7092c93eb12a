//! kart-sim: headless driving session for the kart control core.
//!
//! Replays a scripted lap at an uneven frame rate over a fixed physics rate,
//! logging every drift event and a summary at the end.

mod script;

use anyhow::Result;
use engine_core::{Quat, Time, Vec3};
use input::InputState;
use kart::{default_config_path, KartConfig, KartController, KartEvent};
use physics::PhysicsWorld;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::Duration;

use script::Script;

/// Physics rate for the session.
const PHYSICS_HZ: f64 = 50.0;
/// Frame times are drawn between these (seconds).
const MIN_FRAME: f32 = 1.0 / 144.0;
const MAX_FRAME: f32 = 1.0 / 30.0;

#[derive(Debug, Default)]
struct SessionStats {
    drifts: u32,
    boosts: u32,
    best_tier: u8,
    top_speed: f32,
}

impl SessionStats {
    fn record(&mut self, event: &KartEvent) {
        match *event {
            KartEvent::DriftStarted { .. } => self.drifts += 1,
            KartEvent::TierReached { tier, .. } => self.best_tier = self.best_tier.max(tier),
            KartEvent::BoostGranted { .. } => self.boosts += 1,
            KartEvent::DriftEnded => {}
        }
    }
}

fn build_track(world: &mut PhysicsWorld) {
    world.add_ground_plane();
    // Wide 12° ramp across the run-out after the second drift.
    world.add_static_cuboid(
        Vec3::new(0.0, 0.0, -150.0),
        Quat::from_rotation_x(12f32.to_radians()),
        Vec3::new(60.0, 1.0, 20.0),
    );
}

fn log_event(time: f32, event: &KartEvent) {
    match event {
        KartEvent::DriftStarted { direction } => {
            log::info!("[{:6.2}s] drift started {:?}", time, direction)
        }
        KartEvent::TierReached { tier, color_index } => {
            log::info!("[{:6.2}s] tier {} reached (colour {})", time, tier, color_index)
        }
        KartEvent::BoostGranted {
            tier,
            multiplier,
            ramp_duration_seconds,
            ..
        } => log::info!(
            "[{:6.2}s] boost granted: tier {} x{} over {:.2}s",
            time,
            tier,
            multiplier,
            ramp_duration_seconds
        ),
        KartEvent::DriftEnded => log::info!("[{:6.2}s] drift ended", time),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // An explicit config path must load; the default location is optional.
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => KartConfig::load_from(&path)?,
        None => KartConfig::load_or_default(&default_config_path()),
    };

    log::info!("Starting kart-sim ({} Hz physics)", PHYSICS_HZ);

    let mut time = Time::new();
    time.set_fixed_rate(PHYSICS_HZ);
    let fixed_dt = time.fixed_timestep_seconds();

    let mut world = PhysicsWorld::new();
    world.set_timestep(fixed_dt);
    build_track(&mut world);
    let mut kart = KartController::spawn(&mut world, Vec3::new(0.0, 0.5, 0.0), 0.0, config);
    world.update_query_pipeline();

    let mut input = InputState::new();
    let script = Script::demo_lap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut stats = SessionStats::default();
    let mut physics_steps = 0u64;

    while time.elapsed_seconds() < script.duration() {
        let frame_dt = rng.gen_range(MIN_FRAME..MAX_FRAME);
        time.advance(Duration::from_secs_f32(frame_dt));

        input.begin_frame();
        script.drive(time.elapsed_seconds(), &mut input, &mut rng);
        kart.sample_input(&input.sample(), &world, time.delta_seconds());

        while time.should_fixed_update() {
            kart.step_physics(&mut world, fixed_dt);
            world.step();
            physics_steps += 1;
        }

        let now = time.elapsed_seconds();
        for event in kart.drain_events() {
            log_event(now, &event);
            stats.record(&event);
        }

        let snapshot = kart.snapshot(&world);
        stats.top_speed = stats.top_speed.max(snapshot.velocity.length());
        if time.frame_count() % 120 == 0 {
            log::debug!(
                "[{:6.2}s] pos {:?} speed {:.1} turn {:.1} grounded {}",
                now,
                snapshot.position,
                snapshot.current_speed,
                snapshot.current_turn_rate,
                snapshot.grounded
            );
        }
    }

    let snapshot = kart.snapshot(&world);
    log::info!(
        "Session over: {} frames, {} physics steps, {} drifts, {} boosts, best tier {}, top speed {:.1} m/s",
        time.frame_count(),
        physics_steps,
        stats.drifts,
        stats.boosts,
        stats.best_tier,
        stats.top_speed
    );
    log::info!(
        "Final position {:?}, speed {:.1}, up {:?}",
        snapshot.position,
        snapshot.current_speed,
        snapshot.body_rotation * Vec3::Y
    );

    kart.despawn(&mut world);
    Ok(())
}
