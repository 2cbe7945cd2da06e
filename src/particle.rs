//! Point masses, and their per-substep integration.

use lin_alg::f32::Vec3;

#[derive(Clone, Debug)]
pub struct Particle {
    pub posit: Vec3,
    pub vel: Vec3,
    /// Accumulated this substep by gravity, springs and drag. Cleared after integration.
    pub force: Vec3,
    pub mass: f32,
    /// Anchors. These only move via `Cloth::translate`.
    pub fixed: bool,
    /// Position in the particle arena, and in the published position and normal buffers.
    pub index: usize,
}

/// The inputs the integrator needs from the config, per substep.
#[derive(Clone, Copy, Debug)]
pub struct Integration {
    pub dt: f32,
    pub gravity: Vec3,
    pub floor_height: f32,
    pub friction: f32,
    pub elasticity: f32,
}

impl Particle {
    pub fn new(index: usize, posit: Vec3, mass: f32, fixed: bool) -> Self {
        Self {
            posit,
            vel: Vec3::new_zero(),
            force: Vec3::new_zero(),
            mass,
            fixed,
            index,
        }
    }

    pub fn apply_force(&mut self, f: Vec3) {
        self.force += f;
    }

    /// Add gravity, take a semi-implicit Euler step, resolve the floor, then clear the force accumulator.
    /// Returns true if the particle hit the floor.
    ///
    /// Anchors don't move; their accumulator is cleared so forces from attached springs don't pile up.
    pub fn integrate(&mut self, p: &Integration) -> bool {
        if self.fixed {
            self.force = Vec3::new_zero();
            return false;
        }

        self.force += p.gravity * self.mass;
        self.vel += (self.force / self.mass) * p.dt;
        self.posit += self.vel * p.dt;

        let hit = self.collide_floor(p.floor_height, p.friction, p.elasticity);

        self.force = Vec3::new_zero();
        hit
    }

    /// Reflect the particle back above a floor it has passed through.
    pub fn collide_floor(&mut self, floor_height: f32, friction: f32, elasticity: f32) -> bool {
        if self.posit.y >= floor_height {
            return false;
        }

        self.posit.y = 2. * floor_height - self.posit.y;
        self.vel.y = -elasticity * self.vel.y;
        self.vel.x *= 1. - friction;
        self.vel.z *= 1. - friction;

        true
    }
}
