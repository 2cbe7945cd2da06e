//! Spring-dampers between pairs of particles.

use lin_alg::f32::Vec3;

use crate::particle::Particle;

/// Below this length, the direction between two endpoints is undefined. Springs this short are rejected at
/// build time, and contribute no force if they collapse to it during a run.
pub const MIN_SPRING_LEN: f32 = 1.0e-7;

#[derive(Clone, Debug)]
pub struct Spring {
    pub p1: usize,
    pub p2: usize,
    /// Set once at build time, from the distance between the endpoints.
    pub rest_len: f32,
    /// Stiffness.
    pub k: f32,
    /// Damping.
    pub d: f32,
}

impl Spring {
    /// Rest length is taken from the current particle positions.
    ///
    /// # Panics
    /// If `p1` or `p2` is out of range for `particles`.
    pub fn new(particles: &[Particle], p1: usize, p2: usize, k: f32, d: f32) -> Self {
        let rest_len = (particles[p2].posit - particles[p1].posit).magnitude();
        Self {
            p1,
            p2,
            rest_len,
            k,
            d,
        }
    }

    /// The force this spring applies to `p1`. `p2` receives the negation. `None` if the endpoints coincide.
    pub fn force(&self, particles: &[Particle]) -> Option<Vec3> {
        let a = &particles[self.p1];
        let b = &particles[self.p2];

        let diff = b.posit - a.posit;
        let len = diff.magnitude();
        if len < MIN_SPRING_LEN {
            return None;
        }
        let dir = diff / len;

        // Closing speed along the spring axis.
        let v_close = dir.dot(a.vel) - dir.dot(b.vel);

        let f_mag = -self.k * (self.rest_len - len) - self.d * v_close;
        Some(dir * f_mag)
    }

    /// Elastic potential energy currently stored.
    pub fn energy(&self, particles: &[Particle]) -> f32 {
        let len = (particles[self.p2].posit - particles[self.p1].posit).magnitude();
        0.5 * self.k * (len - self.rest_len).powi(2)
    }

    /// |len - rest| / rest
    pub fn strain(&self, particles: &[Particle]) -> f32 {
        let len = (particles[self.p2].posit - particles[self.p1].posit).magnitude();
        (len - self.rest_len).abs() / self.rest_len
    }
}

/// Accumulate every spring's force into its endpoints. Returns the number of springs skipped because their
/// endpoints coincide.
pub fn apply_spring_forces(springs: &[Spring], particles: &mut [Particle]) -> usize {
    let mut skipped = 0;

    for spring in springs {
        match spring.force(particles) {
            Some(f) => {
                particles[spring.p1].apply_force(f);
                particles[spring.p2].apply_force(-f);
            }
            None => skipped += 1,
        }
    }

    skipped
}
