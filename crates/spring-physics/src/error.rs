//! Error types for sandbox operations.

use crate::id::{BodyId, ForceId, LinkId};
use std::fmt;

/// Errors returned by construction and editor commands.
///
/// A command that fails never mutates the world.
#[derive(Debug, Clone, PartialEq)]
pub enum SandboxError {
    /// Mass must be positive and finite.
    InvalidMass(f64),
    /// Spring constant must be non-negative and finite.
    InvalidStiffness(f64),
    /// A named coefficient is outside its allowed range.
    InvalidCoefficient { name: &'static str, value: f64 },
    /// Time step must be non-negative and finite.
    InvalidTimeStep(f64),
    /// Zoom (and zoom factors) must be positive and finite.
    InvalidZoom(f64),
    /// Viewport dimensions must be positive.
    InvalidViewport { width: f64, height: f64 },
    /// A limit axis needs a direction.
    DegenerateAxis,
    /// A link needs two distinct bodies.
    SelfLink(BodyId),
    UnknownBody(BodyId),
    UnknownLink(LinkId),
    UnknownForce(ForceId),
    /// Center of mass of nothing.
    EmptySelection,
    NoActiveCamera,
    UnknownCamera(usize),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::InvalidMass(m) => write!(f, "mass must be positive and finite (got {})", m),
            SandboxError::InvalidStiffness(k) => {
                write!(f, "stiffness must be non-negative and finite (got {})", k)
            }
            SandboxError::InvalidCoefficient { name, value } => {
                write!(f, "{} must be in [0, 1] (got {})", name, value)
            }
            SandboxError::InvalidTimeStep(dt) => {
                write!(f, "time step must be non-negative and finite (got {})", dt)
            }
            SandboxError::InvalidZoom(z) => write!(f, "zoom must be positive and finite (got {})", z),
            SandboxError::InvalidViewport { width, height } => {
                write!(f, "viewport must have positive size (got {}x{})", width, height)
            }
            SandboxError::DegenerateAxis => write!(f, "limit axis must have non-zero length"),
            SandboxError::SelfLink(id) => write!(f, "cannot link {} to itself", id),
            SandboxError::UnknownBody(id) => write!(f, "no body with handle {}", id),
            SandboxError::UnknownLink(id) => write!(f, "no link with handle {}", id),
            SandboxError::UnknownForce(id) => write!(f, "no force with handle {}", id),
            SandboxError::EmptySelection => write!(f, "center of mass needs at least one body"),
            SandboxError::NoActiveCamera => write!(f, "no camera is active"),
            SandboxError::UnknownCamera(index) => write!(f, "no camera at index {}", index),
        }
    }
}

impl std::error::Error for SandboxError {}

/// Reject non-positive or non-finite masses.
pub fn validate_mass(mass: f64) -> Result<f64, SandboxError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(SandboxError::InvalidMass(mass))
    }
}

/// Reject coefficients outside [0, 1].
pub fn validate_unit_interval(name: &'static str, value: f64) -> Result<f64, SandboxError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SandboxError::InvalidCoefficient { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mass() {
        assert_eq!(validate_mass(2.0), Ok(2.0));
        assert_eq!(validate_mass(0.0), Err(SandboxError::InvalidMass(0.0)));
        assert_eq!(validate_mass(-1.0), Err(SandboxError::InvalidMass(-1.0)));
        assert!(validate_mass(f64::NAN).is_err());
        assert!(validate_mass(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_unit_interval() {
        assert!(validate_unit_interval("restitution", 0.0).is_ok());
        assert!(validate_unit_interval("restitution", 1.0).is_ok());
        assert!(validate_unit_interval("friction", 1.5).is_err());
        assert!(validate_unit_interval("friction", f64::NAN).is_err());
    }

    #[test]
    fn test_display_mentions_handle() {
        let msg = SandboxError::UnknownBody(BodyId(7)).to_string();
        assert!(msg.contains("body#7"));
    }
}
