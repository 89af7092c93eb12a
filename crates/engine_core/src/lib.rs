//! Core engine types and utilities for the kart simulation.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial helpers
//! - Simulated time and the fixed physics timestep
//! - Scalar, angle and easing math shared by the control core

pub mod math;
pub mod time;
pub mod transform;

pub use math::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
