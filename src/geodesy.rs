//! Distance and bearing between two points on the earth.
//!
//! Distances come from Vincenty's inverse solution on the WGS-84 ellipsoid.
//! Where that iteration does not settle (nearly antipodal points) or the two
//! points coincide, the haversine formula on a mean-radius sphere is used.

use crate::geo::LatLon;

/// WGS-84 equatorial radius, metres.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 polar radius, metres.
pub const WGS84_B: f64 = 6_356_752.314_245;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

const VINCENTY_TOLERANCE: f64 = 1e-12;
const VINCENTY_MAX_ITERATIONS: usize = 100;

/// Distance between two points in kilometres.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    match vincenty_m(a, b) {
        Some(m) => m / 1000.0,
        None => haversine_km(a, b),
    }
}

/// Great-circle distance on a sphere of radius 6371 km.
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    haversine(a, b, MEAN_EARTH_RADIUS_KM)
}

pub(crate) fn haversine(a: LatLon, b: LatLon, radius: f64) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    radius * c
}

/// Ellipsoidal distance in metres, or `None` when the points coincide or the
/// longitude iteration fails to converge.
pub fn vincenty_m(a: LatLon, b: LatLon) -> Option<f64> {
    let l = (b.lon() - a.lon()).to_radians();
    let u1 = ((1.0 - WGS84_F) * a.lat().to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.lat().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma) = (0.0, 0.0, 0.0);
    let (mut cos_sq_alpha, mut cos_2sigma_m) = (0.0, 0.0);

    for _ in 0..VINCENTY_MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return None;
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0
        cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if !lambda.is_finite() {
            return None;
        }
        if (lambda - previous).abs() < VINCENTY_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return None;
    }

    let u_sq = cos_sq_alpha * (WGS84_A.powi(2) - WGS84_B.powi(2)) / WGS84_B.powi(2);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    let s = WGS84_B * big_a * (sigma - delta_sigma);
    if s.is_finite() {
        Some(s)
    } else {
        None
    }
}

/// Initial great-circle bearing from `a` to `b` in degrees, within [0, 360).
pub fn bearing_deg(a: LatLon, b: LatLon) -> f64 {
    let (lat1, lat2) = (a.lat().to_radians(), b.lat().to_radians());
    let d_lon = (b.lon() - a.lon()).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    let theta = y.atan2(x).to_degrees();
    let bearing = (theta + 360.0) % 360.0;
    // -0.0 and rounding at the wrap point
    if bearing >= 360.0 {
        0.0
    } else {
        bearing.abs()
    }
}

/// Bearing as pilots read it: whole degrees, three digits (`007`).
pub fn format_bearing(deg: f64) -> String {
    format!("{:03}", deg.round() as i64 % 360)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lasham() -> LatLon {
        LatLon::new(51.1869, -1.0334)
    }

    fn booker() -> LatLon {
        LatLon::new(51.6153, -0.8085)
    }

    #[test]
    fn lasham_to_booker_is_stable() {
        let d = distance_km(lasham(), booker());
        assert!(d > 45.0 && d < 55.0, "distance was {}", d);
        for _ in 0..10 {
            assert!((distance_km(lasham(), booker()) - d).abs() < 0.1);
        }
        // Ellipsoid and sphere agree to well under one percent at this range
        assert!((d - haversine_km(lasham(), booker())).abs() / d < 0.01);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(lasham(), booker());
        let back = distance_km(booker(), lasham());
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn same_point_is_zero() {
        assert_eq!(vincenty_m(lasham(), lasham()), None);
        assert_eq!(distance_km(lasham(), lasham()), 0.0);
    }

    #[test]
    fn antipodal_points_fall_back_to_haversine() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(0.5, 179.7);
        let d = distance_km(a, b);
        assert!(d.is_finite());
        assert!(d > 19_000.0 && d < 20_100.0, "distance was {}", d);
    }

    #[test]
    fn one_degree_of_meridian() {
        let d = distance_km(LatLon::new(0.0, 0.0), LatLon::new(1.0, 0.0));
        assert!((d - 110.574).abs() < 0.01, "distance was {}", d);
    }

    #[test]
    fn bearings() {
        let origin = LatLon::new(51.0, -1.0);
        assert!(bearing_deg(origin, LatLon::new(52.0, -1.0)).abs() < 1e-9);
        assert!((bearing_deg(origin, LatLon::new(51.0, 0.0)) - 90.0).abs() < 0.5);
        assert!((bearing_deg(origin, LatLon::new(50.0, -1.0)) - 180.0).abs() < 1e-9);
        assert!((bearing_deg(origin, LatLon::new(51.0, -2.0)) - 270.0).abs() < 0.5);
    }

    #[test]
    fn reverse_bearing_is_roughly_opposite() {
        let out = bearing_deg(lasham(), booker());
        let back = bearing_deg(booker(), lasham());
        assert!(out >= 0.0 && out < 360.0);
        assert!(((back + 180.0) % 360.0 - out).abs() < 0.5);
    }

    #[test]
    fn bearing_display() {
        assert_eq!(format_bearing(7.4), "007");
        assert_eq!(format_bearing(359.6), "000");
        assert_eq!(format_bearing(123.0), "123");
    }
}
