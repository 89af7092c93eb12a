//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different body types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground, ramps, walls)
    Environment = 1 << 0,
    /// Kart bodies
    Kart = 1 << 1,
}

impl CollisionGroup {
    /// Create a collision group for environment.
    pub fn environment() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Environment as u32);
        let filter = Group::ALL;
        (membership, filter)
    }

    /// Create a collision group for karts (they bump into the track and each other).
    pub fn kart() -> (Group, Group) {
        let membership = Group::from_bits_retain(Self::Kart as u32);
        let filter = Group::from_bits_retain(Self::Environment as u32 | Self::Kart as u32);
        (membership, filter)
    }

    /// Query groups for ground probes: only static environment counts as ground.
    pub fn ground_query() -> InteractionGroups {
        InteractionGroups::new(
            Group::ALL,
            Group::from_bits_retain(Self::Environment as u32),
        )
    }
}

/// Handles linking a kart to its physics representation.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub rigid_body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl PhysicsBody {
    pub fn new(rigid_body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self {
            rigid_body,
            collider,
        }
    }
}
