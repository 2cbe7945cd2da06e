//! Errors raised while building a cloth. Stepping a built cloth never fails; numeric trouble at run time
//! is handled by skipping the degenerate spring or triangle for that substep.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ClothError {
    /// Grid dimensions must be even and at least 2.
    InvalidGrid { width: usize, height: usize },
    /// A construction parameter is out of its allowed range.
    InvalidConfig { reason: &'static str },
    /// A particle has a non-positive or non-finite mass, or a non-finite position.
    InvalidParticle { index: usize, reason: &'static str },
    /// A spring references a missing particle, connects a particle to itself, or has no rest length.
    InvalidSpring { index: usize, reason: &'static str },
    /// A triangle references a missing particle, or repeats a vertex.
    InvalidTriangle { index: usize, reason: &'static str },
    /// No particles were supplied.
    EmptyCloth,
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGrid { width, height } => write!(
                f,
                "invalid grid {width}x{height}: dimensions must be even and at least 2"
            ),
            Self::InvalidConfig { reason } => write!(f, "invalid configuration: {reason}"),
            Self::InvalidParticle { index, reason } => {
                write!(f, "invalid particle {index}: {reason}")
            }
            Self::InvalidSpring { index, reason } => write!(f, "invalid spring {index}: {reason}"),
            Self::InvalidTriangle { index, reason } => {
                write!(f, "invalid triangle {index}: {reason}")
            }
            Self::EmptyCloth => write!(f, "a cloth needs at least one particle"),
        }
    }
}

impl std::error::Error for ClothError {}
