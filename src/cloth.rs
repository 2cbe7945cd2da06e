//! The cloth: owns the particle arena, springs and triangles, and advances them a frame at a time.
//!
//! Each frame runs a fixed number of substeps. Each substep integrates the particles (consuming the forces
//! accumulated by the previous substep), then accumulates spring forces, then drag, then recomputes the
//! vertex normals. After the last substep, positions are published for the renderer.
//!
//! `step` and `translate` take `&mut self`. A host that shares a cloth across threads must serialize them
//! behind a single owner.

use lin_alg::f32::Vec3;
use log::{debug, warn};

use crate::{
    aero::{apply_drag, Air},
    config::Config,
    error::ClothError,
    normals::{calc_normals, NormalMode},
    particle::{Integration, Particle},
    spring::{apply_spring_forces, Spring},
    topology::{ClothMesh, Triangle},
};

/// What happened during one `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub substeps: usize,
    /// Particle-substeps in which a particle was reflected off the floor.
    pub floor_contacts: usize,
    /// Spring evaluations skipped because the endpoints coincided.
    pub degenerate_springs: usize,
    /// Triangle evaluations (drag and normals) skipped because the triangle had collapsed.
    pub degenerate_triangles: usize,
}

impl StepStats {
    fn add(&mut self, other: Self) {
        self.substeps += other.substeps;
        self.floor_contacts += other.floor_contacts;
        self.degenerate_springs += other.degenerate_springs;
        self.degenerate_triangles += other.degenerate_triangles;
    }
}

pub struct Cloth {
    particles: Vec<Particle>,
    springs: Vec<Spring>,
    triangles: Vec<Triangle>,
    indices: Vec<u32>,
    /// Published after each step.
    posits: Vec<Vec3>,
    /// Vertex normal accumulators. Also the published normals.
    normals: Vec<Vec3>,
    wind: Vec3,
    integration: Integration,
    air_density: f32,
    drag_coeff: f32,
    substeps: usize,
    normal_mode: NormalMode,
    time_elapsed: f32,
    frame: usize,
}

impl Cloth {
    /// Build a grid cloth from the config.
    pub fn new(cfg: &Config) -> Result<Self, ClothError> {
        let mesh = ClothMesh::build(cfg)?;
        Ok(Self::from_mesh(mesh, cfg))
    }

    /// Use arbitrary topology; the grid dimensions in `cfg` are ignored.
    pub fn from_parts(
        particles: Vec<Particle>,
        springs: Vec<Spring>,
        triangles: Vec<Triangle>,
        cfg: &Config,
    ) -> Result<Self, ClothError> {
        cfg.validate_physics()?;
        let mesh = ClothMesh::from_parts(particles, springs, triangles)?;
        Ok(Self::from_mesh(mesh, cfg))
    }

    fn from_mesh(mesh: ClothMesh, cfg: &Config) -> Self {
        let n = mesh.particles.len();

        let mut result = Self {
            posits: mesh.particles.iter().map(|p| p.posit).collect(),
            normals: vec![Vec3::new_zero(); n],
            particles: mesh.particles,
            springs: mesh.springs,
            triangles: mesh.triangles,
            indices: mesh.indices,
            wind: cfg.wind,
            integration: Integration {
                dt: cfg.dt,
                gravity: cfg.gravity,
                floor_height: cfg.floor_height,
                friction: cfg.friction,
                elasticity: cfg.elasticity,
            },
            air_density: cfg.air_density,
            drag_coeff: cfg.drag_coeff,
            substeps: cfg.substeps,
            normal_mode: cfg.normal_mode,
            time_elapsed: 0.,
            frame: 0,
        };

        calc_normals(
            &mut result.normals,
            &result.triangles,
            &result.particles,
            result.normal_mode,
        );
        result
    }

    /// Advance one rendered frame, then publish positions and normals.
    pub fn step(&mut self) -> StepStats {
        let mut stats = StepStats::default();
        for _ in 0..self.substeps {
            stats.add(self.substep());
        }

        for (posit, p) in self.posits.iter_mut().zip(&self.particles) {
            *posit = p.posit;
        }
        self.frame += 1;

        if stats.degenerate_springs > 0 || stats.degenerate_triangles > 0 {
            warn!(
                "Frame {}: skipped {} collapsed spring evaluations and {} collapsed triangle evaluations",
                self.frame, stats.degenerate_springs, stats.degenerate_triangles
            );
        }
        debug!("Frame {}: {} floor contacts", self.frame, stats.floor_contacts);

        stats
    }

    fn substep(&mut self) -> StepStats {
        let mut stats = StepStats {
            substeps: 1,
            ..Default::default()
        };

        for p in &mut self.particles {
            if p.integrate(&self.integration) {
                stats.floor_contacts += 1;
            }
        }

        stats.degenerate_springs = apply_spring_forces(&self.springs, &mut self.particles);

        let air = Air {
            density: self.air_density,
            drag_coeff: self.drag_coeff,
            wind: self.wind,
        };
        stats.degenerate_triangles = apply_drag(&self.triangles, &mut self.particles, &air);

        stats.degenerate_triangles += calc_normals(
            &mut self.normals,
            &self.triangles,
            &self.particles,
            self.normal_mode,
        );

        self.time_elapsed += self.integration.dt;
        stats
    }

    /// Move every anchor by `delta`. An anchor that would end up at or below the floor stays where it was.
    /// This is the only way anchors move.
    pub fn translate(&mut self, delta: Vec3) {
        let floor = self.integration.floor_height;

        for p in self.particles.iter_mut().filter(|p| p.fixed) {
            let moved = p.posit + delta;
            if moved.y > floor {
                p.posit = moved;
            }
        }
    }

    pub fn wind(&self) -> Vec3 {
        self.wind
    }

    /// Takes effect from the next substep. Unbounded.
    pub fn set_wind(&mut self, wind: Vec3) {
        self.wind = wind;
    }

    /// Vertex positions as of the last `step`.
    pub fn posits(&self) -> &[Vec3] {
        &self.posits
    }

    /// Un-normalized vertex normals, parallel to `posits`.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Fixed triangle index buffer; three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn gravity(&self) -> Vec3 {
        self.integration.gravity
    }

    pub fn floor_height(&self) -> f32 {
        self.integration.floor_height
    }

    /// Simulated seconds.
    pub fn time_elapsed(&self) -> f32 {
        self.time_elapsed
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}
