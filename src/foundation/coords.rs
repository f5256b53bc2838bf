//! Conversions between geographic coordinates and globe-centered scene space.
//!
//! The globe is centered at the origin with the north pole on +Y. Longitude 0
//! sits on +Z and longitude 90 on +X. Altitude is relative to the sphere
//! radius, so `altitude = 1` is one radius above the surface.

/// Radius of the reference sphere used by the bundled layers.
pub const GLOBE_RADIUS: f64 = 100.0;

/// A point in scene space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cartesian {
    /// X component.
    pub x: f64,
    /// Y component (polar axis).
    pub y: f64,
    /// Z component.
    pub z: f64,
}

/// A point in geographic terms.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoCoords {
    /// Latitude in degrees, `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, `(-180, 180]`.
    pub lng: f64,
    /// Height above the surface in units of `radius`.
    pub altitude: f64,
}

/// Convert geographic coordinates to scene space.
pub fn to_cartesian(lat: f64, lng: f64, altitude: f64, radius: f64) -> Cartesian {
    let phi = (90.0 - lat).to_radians();
    let theta = (90.0 - lng).to_radians();
    let r = radius * (1.0 + altitude);

    Cartesian {
        x: r * phi.sin() * theta.cos(),
        y: r * phi.cos(),
        z: r * phi.sin() * theta.sin(),
    }
}

/// Convert a scene-space point back to geographic coordinates.
///
/// The origin maps to `lat = 0, lng = 0, altitude = -1`. On the polar axis the
/// longitude is undefined and reported as `90`.
pub fn to_polar(p: Cartesian, radius: f64) -> GeoCoords {
    let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
    if r == 0.0 {
        return GeoCoords {
            lat: 0.0,
            lng: 0.0,
            altitude: -1.0,
        };
    }

    // atan2 keeps precision near the poles where acos(y / r) degrades.
    let phi = (p.x * p.x + p.z * p.z).sqrt().atan2(p.y);
    let theta = p.z.atan2(p.x);

    let mut lng = 90.0 - theta.to_degrees();
    if lng > 180.0 {
        lng -= 360.0;
    }

    GeoCoords {
        lat: 90.0 - phi.to_degrees(),
        lng,
        altitude: r / radius - 1.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/coords.rs"]
mod tests;
