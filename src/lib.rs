//! A mass-spring cloth. Point masses on a grid, joined by spring-dampers, pushed by gravity and wind drag,
//! bouncing off a floor. Integrated with semi-implicit Euler over small fixed substeps.
//!
//! Rendering is left to the host: after each `Cloth::step`, read `posits`, `normals` and `indices`.

pub mod aero;
pub mod cloth;
pub mod config;
pub mod error;
pub mod normals;
pub mod particle;
pub mod playback;
pub mod properties;
#[cfg(feature = "gui")]
pub mod render;
pub mod spring;
pub mod topology;
#[cfg(feature = "gui")]
mod ui;
pub mod util;
pub mod wind;

pub use cloth::{Cloth, StepStats};
pub use config::Config;
pub use error::ClothError;
pub use normals::NormalMode;
pub use particle::Particle;
pub use spring::Spring;
pub use topology::{ClothMesh, Triangle};
