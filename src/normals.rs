//! Per-vertex shading normals, from the current triangle geometry.

use bincode::{Decode, Encode};
use lin_alg::f32::Vec3;

use crate::{aero::MIN_FACE_NORMAL, particle::Particle, topology::Triangle};

/// Whether vertex normals start from zero each substep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode)]
pub enum NormalMode {
    /// Zero the accumulators, then sum unit face normals. Normals reflect only the current geometry.
    #[default]
    Recompute,
    /// Never zero; unit face normals keep summing across substeps and frames, so magnitudes grow without
    /// bound. Only the direction is meaningful. Kept for viewers tuned against this legacy behavior.
    Accumulate,
}

/// Add each triangle's unit face normal to its three vertices. The sums are not normalized; the shader does
/// that. Returns the number of collapsed triangles skipped.
pub fn calc_normals(
    normals: &mut [Vec3],
    triangles: &[Triangle],
    particles: &[Particle],
    mode: NormalMode,
) -> usize {
    if mode == NormalMode::Recompute {
        for n in normals.iter_mut() {
            *n = Vec3::new_zero();
        }
    }

    let mut skipped = 0;
    for tri in triangles {
        let n = tri.face_normal(particles);
        let mag = n.magnitude();
        if mag < MIN_FACE_NORMAL {
            skipped += 1;
            continue;
        }
        let n = n / mag;

        normals[particles[tri.p1].index] += n;
        normals[particles[tri.p2].index] += n;
        normals[particles[tri.p3].index] += n;
    }

    skipped
}
