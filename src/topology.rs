//! Builds the fixed particle lattice, its springs, and its triangulation. Topology never changes after this.

use lin_alg::f32::Vec3;
use log::info;

use crate::{
    config::Config,
    error::ClothError,
    particle::Particle,
    spring::{Spring, MIN_SPRING_LEN},
};

/// Three particle indices. Used for drag and normals only; carries no state of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
}

impl Triangle {
    pub fn new(p1: usize, p2: usize, p3: usize) -> Self {
        Self { p1, p2, p3 }
    }

    /// Non-unit face normal: (p2 - p1) × (p3 - p1). Its magnitude is twice the triangle's area.
    pub fn face_normal(&self, particles: &[Particle]) -> Vec3 {
        let a = particles[self.p1].posit;
        let b = particles[self.p2].posit;
        let c = particles[self.p3].posit;

        (b - a).cross(c - a)
    }
}

/// Everything the simulation owns, and an index buffer for the renderer.
#[derive(Clone, Debug)]
pub struct ClothMesh {
    pub particles: Vec<Particle>,
    pub springs: Vec<Spring>,
    pub triangles: Vec<Triangle>,
    /// Three per triangle, in triangle order.
    pub indices: Vec<u32>,
}

/// Row-major: the lowest row first, left to right.
fn grid_id(i: usize, j: usize, width: usize) -> usize {
    j + i * width
}

impl ClothMesh {
    /// Build a `grid_width` × `grid_height` sheet in the XY plane, centered on X, with its top row fixed.
    pub fn build(cfg: &Config) -> Result<Self, ClothError> {
        cfg.validate()?;

        let (w, h) = (cfg.grid_width, cfg.grid_height);

        let mut particles = Vec::with_capacity(w * h);
        for i in 0..h {
            for j in 0..w {
                let posit = Vec3::new(
                    cfg.spacing * (j as f32 - w as f32 / 2.),
                    cfg.origin_height + cfg.spacing * i as f32,
                    0.,
                );
                particles.push(Particle::new(
                    grid_id(i, j, w),
                    posit,
                    cfg.mass,
                    i == h - 1,
                ));
            }
        }

        // Each particle connects to the three above it and the one to its right, so every edge is made once.
        let mut springs = Vec::new();
        let mut add = |a, b| {
            springs.push(Spring::new(
                &particles,
                a,
                b,
                cfg.stiffness,
                cfg.damping,
            ))
        };
        for i in 0..h {
            for j in 0..w {
                let id = grid_id(i, j, w);

                if i < h - 1 {
                    if j > 0 {
                        add(id, grid_id(i + 1, j - 1, w));
                    }
                    if j < w - 1 {
                        add(id, grid_id(i + 1, j + 1, w));
                    }
                    add(id, grid_id(i + 1, j, w));
                }
                if j < w - 1 {
                    add(id, grid_id(i, j + 1, w));
                }
            }
        }

        // Two triangles per cell, split along the lower-right to upper-left diagonal. Both wind the same way.
        let mut triangles = Vec::with_capacity(2 * (w - 1) * (h - 1));
        for i in 0..h - 1 {
            for j in 0..w - 1 {
                let lower_left = grid_id(i, j, w);
                let lower_right = grid_id(i, j + 1, w);
                let upper_left = grid_id(i + 1, j, w);
                let upper_right = grid_id(i + 1, j + 1, w);

                triangles.push(Triangle::new(lower_left, lower_right, upper_left));
                triangles.push(Triangle::new(lower_right, upper_right, upper_left));
            }
        }

        let result = Self::from_parts(particles, springs, triangles)?;

        info!(
            "Built a {w}x{h} cloth: {} particles, {} springs, {} triangles",
            result.particles.len(),
            result.springs.len(),
            result.triangles.len()
        );

        Ok(result)
    }

    /// Assemble arbitrary topology, e.g. a single spring. Particle indices are reassigned to match their
    /// position in `particles`.
    pub fn from_parts(
        mut particles: Vec<Particle>,
        springs: Vec<Spring>,
        triangles: Vec<Triangle>,
    ) -> Result<Self, ClothError> {
        if particles.is_empty() {
            return Err(ClothError::EmptyCloth);
        }
        let n = particles.len();

        for (i, p) in particles.iter_mut().enumerate() {
            if !p.mass.is_finite() || p.mass <= 0. {
                return Err(ClothError::InvalidParticle {
                    index: i,
                    reason: "mass must be finite and positive",
                });
            }
            if !(p.posit.x.is_finite() && p.posit.y.is_finite() && p.posit.z.is_finite()) {
                return Err(ClothError::InvalidParticle {
                    index: i,
                    reason: "position is not finite",
                });
            }
            p.index = i;
        }

        for (i, s) in springs.iter().enumerate() {
            if s.p1 >= n || s.p2 >= n {
                return Err(ClothError::InvalidSpring {
                    index: i,
                    reason: "endpoint out of range",
                });
            }
            if s.p1 == s.p2 {
                return Err(ClothError::InvalidSpring {
                    index: i,
                    reason: "endpoints are the same particle",
                });
            }
            if !s.rest_len.is_finite() || s.rest_len < MIN_SPRING_LEN {
                return Err(ClothError::InvalidSpring {
                    index: i,
                    reason: "rest length is zero",
                });
            }
        }

        let mut indices = Vec::with_capacity(triangles.len() * 3);
        for (i, t) in triangles.iter().enumerate() {
            if t.p1 >= n || t.p2 >= n || t.p3 >= n {
                return Err(ClothError::InvalidTriangle {
                    index: i,
                    reason: "vertex out of range",
                });
            }
            if t.p1 == t.p2 || t.p2 == t.p3 || t.p1 == t.p3 {
                return Err(ClothError::InvalidTriangle {
                    index: i,
                    reason: "repeated vertex",
                });
            }
            indices.extend([t.p1 as u32, t.p2 as u32, t.p3 as u32]);
        }

        Ok(Self {
            particles,
            springs,
            triangles,
            indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(w: usize, h: usize) -> Config {
        Config {
            grid_width: w,
            grid_height: h,
            ..Default::default()
        }
    }

    fn spring_count(w: usize, h: usize) -> usize {
        // Up, up-left, up-right, right.
        w * (h - 1) + 2 * (w - 1) * (h - 1) + (w - 1) * h
    }

    #[test]
    fn counts() {
        for (w, h) in [(2, 2), (4, 4), (6, 2), (18, 18)] {
            let mesh = ClothMesh::build(&small(w, h)).unwrap();
            assert_eq!(mesh.particles.len(), w * h);
            assert_eq!(mesh.springs.len(), spring_count(w, h));
            assert_eq!(mesh.triangles.len(), 2 * (w - 1) * (h - 1));
            assert_eq!(mesh.indices.len(), 3 * mesh.triangles.len());
        }
    }

    #[test]
    fn top_row_fixed() {
        let mesh = ClothMesh::build(&small(4, 6)).unwrap();
        for p in &mesh.particles {
            assert_eq!(p.fixed, p.index >= 4 * 5);
        }
    }

    #[test]
    fn centered_layout() {
        let cfg = small(4, 4);
        let mesh = ClothMesh::build(&cfg).unwrap();

        let first = mesh.particles[0].posit;
        assert!((first.x - -0.2).abs() < 1e-6);
        assert!((first.y - 0.5).abs() < 1e-6);

        let last = mesh.particles[15].posit;
        assert!((last.x - 0.1).abs() < 1e-6);
        assert!((last.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn rest_lengths_match_spacing() {
        let mesh = ClothMesh::build(&small(4, 4)).unwrap();
        let diag = 0.1 * 2_f32.sqrt();
        for s in &mesh.springs {
            let axis = (s.rest_len - 0.1).abs() < 1e-5;
            let shear = (s.rest_len - diag).abs() < 1e-5;
            assert!(axis || shear, "rest length {}", s.rest_len);
        }
    }

    #[test]
    fn no_duplicate_edges() {
        let mesh = ClothMesh::build(&small(6, 4)).unwrap();
        let mut edges: Vec<(usize, usize)> = mesh
            .springs
            .iter()
            .map(|s| (s.p1.min(s.p2), s.p1.max(s.p2)))
            .collect();
        let n = edges.len();
        edges.sort();
        edges.dedup();
        assert_eq!(edges.len(), n);
    }

    #[test]
    fn uniform_winding() {
        let mesh = ClothMesh::build(&small(4, 4)).unwrap();
        for t in &mesh.triangles {
            let n = t.face_normal(&mesh.particles);
            assert!(n.z > 0., "{n:?}");
        }
    }

    #[test]
    fn non_square_grid_indexes_by_width() {
        let mesh = ClothMesh::build(&small(6, 2)).unwrap();
        // The lower-right corner cell.
        let t = mesh.triangles[mesh.triangles.len() - 1];
        assert_eq!((t.p1, t.p2, t.p3), (5, 11, 10));
    }

    #[test]
    fn deterministic() {
        let a = ClothMesh::build(&small(8, 6)).unwrap();
        let b = ClothMesh::build(&small(8, 6)).unwrap();

        assert_eq!(a.indices, b.indices);
        assert_eq!(a.triangles, b.triangles);
        for (s1, s2) in a.springs.iter().zip(&b.springs) {
            assert_eq!((s1.p1, s1.p2, s1.rest_len), (s2.p1, s2.p2, s2.rest_len));
        }
    }

    #[test]
    fn bad_parts_rejected() {
        let particles = vec![
            Particle::new(0, Vec3::new_zero(), 1., false),
            Particle::new(1, Vec3::new(1., 0., 0.), 1., false),
        ];

        let self_loop = Spring {
            p1: 1,
            p2: 1,
            rest_len: 1.,
            k: 1.,
            d: 0.,
        };
        assert!(matches!(
            ClothMesh::from_parts(particles.clone(), vec![self_loop], Vec::new()),
            Err(ClothError::InvalidSpring { index: 0, .. })
        ));

        let mut coincident = particles.clone();
        coincident[1].posit = Vec3::new_zero();
        let zero_len = Spring::new(&coincident, 0, 1, 1., 0.);
        assert!(matches!(
            ClothMesh::from_parts(coincident, vec![zero_len], Vec::new()),
            Err(ClothError::InvalidSpring { .. })
        ));

        assert!(matches!(
            ClothMesh::from_parts(particles.clone(), Vec::new(), vec![Triangle::new(0, 1, 2)]),
            Err(ClothError::InvalidTriangle { .. })
        ));

        let mut massless = particles.clone();
        massless[1].mass = 0.;
        assert!(matches!(
            ClothMesh::from_parts(massless, Vec::new(), Vec::new()),
            Err(ClothError::InvalidParticle { index: 1, .. })
        ));

        let mut heavy = particles.clone();
        heavy[0].mass = f32::INFINITY;
        assert!(matches!(
            ClothMesh::from_parts(heavy, Vec::new(), Vec::new()),
            Err(ClothError::InvalidParticle { index: 0, .. })
        ));

        let mut lost = particles.clone();
        lost[1].posit = Vec3::new(0., f32::NAN, 0.);
        assert!(matches!(
            ClothMesh::from_parts(lost, Vec::new(), Vec::new()),
            Err(ClothError::InvalidParticle { index: 1, .. })
        ));

        assert_eq!(
            ClothMesh::from_parts(Vec::new(), Vec::new(), Vec::new()).unwrap_err(),
            ClothError::EmptyCloth
        );
    }
}
