pub use kurbo::Size;

/// A 3D vector in scene space (Y is the polar axis).
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit scale on every axis.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// The vertical (polar) axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector with every component set to `k`.
    pub const fn splat(k: f64) -> Self {
        Self::new(k, k, k)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Rotation expressed as an angle (radians) around an axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisAngle {
    /// Rotation axis; not required to be normalized.
    pub axis: Vec3,
    /// Angle in radians.
    pub angle: f64,
}

impl AxisAngle {
    /// No rotation.
    pub const IDENTITY: Self = Self {
        axis: Vec3::Y,
        angle: 0.0,
    };
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::IDENTITY
    }
}
