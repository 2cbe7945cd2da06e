//! Flat-plate drag on each triangle, from the air velocity relative to the cloth.

use lin_alg::f32::Vec3;

use crate::{particle::Particle, topology::Triangle};

/// Face normals shorter than this mark a collapsed triangle, with no orientation.
pub const MIN_FACE_NORMAL: f32 = 1.0e-12;

#[derive(Clone, Copy, Debug)]
pub struct Air {
    pub density: f32,
    pub drag_coeff: f32,
    /// Ambient wind velocity.
    pub wind: Vec3,
}

/// Drag on one triangle. This is the total; each vertex receives a third of it.
///
/// `None` if the triangle has collapsed. A triangle moving with the air gets zero force.
pub fn drag_force(tri: &Triangle, particles: &[Particle], air: &Air) -> Option<Vec3> {
    let v_mean = (particles[tri.p1].vel + particles[tri.p2].vel + particles[tri.p3].vel) / 3.;
    let v_rel = v_mean - air.wind;

    let n = tri.face_normal(particles);
    let area = n.magnitude();
    if area < MIN_FACE_NORMAL {
        return None;
    }

    let speed = v_rel.magnitude();
    if speed == 0. {
        return Some(Vec3::new_zero());
    }

    // Note: `area` is the cross product magnitude (twice the geometric area), and the projection uses
    // the non-unit normal. The drag constants are tuned against this.
    let ρ = air.density;
    let normal = (n / area) * (v_rel / speed).dot(n);

    Some(normal * (-0.5 * ρ * air.drag_coeff * area * speed.powi(2)))
}

/// Accumulate drag into every triangle's vertices. Returns the number of collapsed triangles skipped.
pub fn apply_drag(triangles: &[Triangle], particles: &mut [Particle], air: &Air) -> usize {
    let mut skipped = 0;

    for tri in triangles {
        match drag_force(tri, particles, air) {
            Some(f) => {
                let f_vert = f / 3.;
                particles[tri.p1].apply_force(f_vert);
                particles[tri.p2].apply_force(f_vert);
                particles[tri.p3].apply_force(f_vert);
            }
            None => skipped += 1,
        }
    }

    skipped
}
