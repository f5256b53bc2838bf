use super::*;

const TOL: f64 = 1e-6;

fn lng_delta(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn equator_prime_meridian_lies_on_positive_z() {
    let p = to_cartesian(0.0, 0.0, 0.0, GLOBE_RADIUS);
    assert!(p.x.abs() < TOL);
    assert!(p.y.abs() < TOL);
    assert!((p.z - GLOBE_RADIUS).abs() < TOL);

    let east = to_cartesian(0.0, 90.0, 0.0, GLOBE_RADIUS);
    assert!((east.x - GLOBE_RADIUS).abs() < TOL);
}

#[test]
fn north_pole_lies_on_positive_y() {
    let p = to_cartesian(90.0, 42.0, 0.5, 10.0);
    assert!(p.x.abs() < TOL);
    assert!((p.y - 15.0).abs() < TOL);
    assert!(p.z.abs() < TOL);
}

#[test]
fn altitude_scales_radius() {
    let p = to_cartesian(12.0, -33.0, 1.0, GLOBE_RADIUS);
    let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
    assert!((r - 2.0 * GLOBE_RADIUS).abs() < TOL);
}

#[test]
fn polar_inverts_cartesian_over_the_sphere() {
    let lats = [-90.0, -89.5, -60.0, -23.4, 0.0, 10.0, 45.0, 89.9, 90.0];
    let lngs = [-180.0, -179.0, -120.5, -45.0, 0.0, 33.3, 90.0, 179.9, 180.0];
    let alts = [0.0, 0.001, 0.5, 3.0];

    for &radius in &[1.0, GLOBE_RADIUS] {
        for &lat in &lats {
            for &lng in &lngs {
                for &alt in &alts {
                    let back = to_polar(to_cartesian(lat, lng, alt, radius), radius);
                    assert!((back.lat - lat).abs() < TOL, "lat {lat} -> {}", back.lat);
                    assert!((back.altitude - alt).abs() < TOL, "alt {alt} -> {}", back.altitude);
                    // Longitude is undefined on the polar axis.
                    if lat.abs() < 90.0 {
                        assert!(lng_delta(back.lng, lng) < TOL, "lng {lng} -> {}", back.lng);
                    }
                }
            }
        }
    }
}

#[test]
fn longitude_is_reported_in_half_open_range() {
    let back = to_polar(to_cartesian(0.0, -180.0, 0.0, 1.0), 1.0);
    assert!(back.lng > -180.0 && back.lng <= 180.0);
    assert!(lng_delta(back.lng, 180.0) < TOL);
}

#[test]
fn origin_maps_to_center() {
    let g = to_polar(
        Cartesian {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        },
        GLOBE_RADIUS,
    );
    assert_eq!(g.altitude, -1.0);
}
