//! Math utilities and types
//!
//! Provides the math types the pooling surface needs: positions and
//! orientations for spawn placement.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for orientations
pub type Quat = Unit<Quaternion<f32>>;

/// Where an instance appears and how it is oriented when spawned.
///
/// Scale is deliberately absent; a pooled instance keeps whatever scale its
/// template bakes in.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Position in world space
    pub position: Vec3,

    /// Orientation quaternion
    pub orientation: Quat,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Quat::identity(),
        }
    }
}

impl Placement {
    /// Create an identity placement at the world origin
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a placement from position and orientation
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create a placement with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_placement() {
        let placement = Placement::identity();
        assert_eq!(placement.position, Vec3::zeros());
        assert_eq!(placement.orientation, Quat::identity());
    }

    #[test]
    fn test_from_position_keeps_identity_orientation() {
        let placement = Placement::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(placement.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(placement.orientation, Quat::identity());
    }
}
