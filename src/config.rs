//! Construction parameters for the cloth. All of these are fixed when the cloth is built; only the wind
//! may change afterwards.

use std::{io, path::Path};

use bincode::{Decode, Encode};
use lin_alg::f32::Vec3;

use crate::{error::ClothError, normals::NormalMode, util};

// Must be even.
pub const GRID_WIDTH: usize = 18;
pub const GRID_HEIGHT: usize = 18;

/// Distance between neighbouring particles.
pub const P_SPACE: f32 = 0.1;
pub const SUBSTEPS_PER_FRAME: usize = 5;
pub const FLOOR_SIZE: f32 = 10.;
pub const FLOOR_HEIGHT: f32 = -1.;

pub const TIMESTEP: f32 = 1. / 10_000.;
pub const AIR_DENSITY: f32 = 1_225.;
pub const DRAG_COEFF: f32 = 1.;
pub const SPRING_FACTOR: f32 = 555.5;
pub const DAMP_FACTOR: f32 = 5.;
pub const FRICTION: f32 = 0.85;
pub const ELASTICITY: f32 = 0.05;

pub const PARTICLE_MASS: f32 = 0.1;
/// Height of the lowest row at build time.
pub const ORIGIN_HEIGHT: f32 = 0.5;

#[derive(Clone, Debug, Encode, Decode)]
pub struct Config {
    pub grid_width: usize,
    pub grid_height: usize,
    pub spacing: f32,
    pub origin_height: f32,
    pub mass: f32,
    /// Spring stiffness, k.
    pub stiffness: f32,
    /// Spring damping, d.
    pub damping: f32,
    pub gravity: Vec3,
    pub air_density: f32,
    pub drag_coeff: f32,
    /// Fraction of horizontal velocity removed on floor contact.
    pub friction: f32,
    /// Fraction of vertical velocity kept (and inverted) on floor contact.
    pub elasticity: f32,
    pub floor_height: f32,
    /// Fixed. Changing this, or the substep count, changes the effective stiffness of the cloth.
    pub dt: f32,
    pub substeps: usize,
    pub wind: Vec3,
    pub normal_mode: NormalMode,
    /// Frames between recorded snapshots.
    pub snapshot_ratio: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            spacing: P_SPACE,
            origin_height: ORIGIN_HEIGHT,
            mass: PARTICLE_MASS,
            stiffness: SPRING_FACTOR,
            damping: DAMP_FACTOR,
            gravity: Vec3::new(0., -9.8, 0.),
            air_density: AIR_DENSITY,
            drag_coeff: DRAG_COEFF,
            friction: FRICTION,
            elasticity: ELASTICITY,
            floor_height: FLOOR_HEIGHT,
            dt: TIMESTEP,
            substeps: SUBSTEPS_PER_FRAME,
            wind: Vec3::new_zero(),
            normal_mode: NormalMode::default(),
            snapshot_ratio: 10,
        }
    }
}

fn finite(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

impl Config {
    pub fn load(path: &Path) -> io::Result<Self> {
        util::load(path)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        util::save(path, self)
    }

    /// Check every parameter before any topology is built from it.
    pub fn validate(&self) -> Result<(), ClothError> {
        let (w, h) = (self.grid_width, self.grid_height);
        if w < 2 || h < 2 || w % 2 != 0 || h % 2 != 0 {
            return Err(ClothError::InvalidGrid {
                width: w,
                height: h,
            });
        }

        self.validate_physics()
    }

    /// Everything except the grid dimensions. Used when the topology is supplied directly.
    pub fn validate_physics(&self) -> Result<(), ClothError> {
        let scalars = [
            self.spacing,
            self.origin_height,
            self.mass,
            self.stiffness,
            self.damping,
            self.air_density,
            self.drag_coeff,
            self.friction,
            self.elasticity,
            self.floor_height,
            self.dt,
        ];
        if scalars.iter().any(|v| !v.is_finite()) || !finite(self.gravity) || !finite(self.wind) {
            return Err(ClothError::InvalidConfig {
                reason: "parameters must be finite",
            });
        }

        if self.spacing <= 0. {
            return Err(ClothError::InvalidConfig {
                reason: "particle spacing must be positive",
            });
        }
        if self.mass <= 0. {
            return Err(ClothError::InvalidConfig {
                reason: "particle mass must be positive",
            });
        }
        if self.dt <= 0. {
            return Err(ClothError::InvalidConfig {
                reason: "timestep must be positive",
            });
        }
        if self.substeps == 0 {
            return Err(ClothError::InvalidConfig {
                reason: "at least one substep per frame is required",
            });
        }
        if self.stiffness < 0. || self.damping < 0. {
            return Err(ClothError::InvalidConfig {
                reason: "spring stiffness and damping must not be negative",
            });
        }
        if self.air_density < 0. || self.drag_coeff < 0. {
            return Err(ClothError::InvalidConfig {
                reason: "air density and drag coefficient must not be negative",
            });
        }
        if !(0. ..=1.).contains(&self.friction) || !(0. ..=1.).contains(&self.elasticity) {
            return Err(ClothError::InvalidConfig {
                reason: "friction and elasticity must lie in [0, 1]",
            });
        }

        Ok(())
    }
}
