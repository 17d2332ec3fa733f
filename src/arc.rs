//! Polyline approximation of airspace boundary arcs.
//!
//! Arcs are rebuilt on a local flat-earth projection around their centre.
//! That is accurate enough at the tens-of-kilometres scale airspace arcs are
//! drawn at, but it is not a geodesic construction.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::geo::LatLon;
use crate::geodesy;

pub const ARC_SEGMENTS: usize = 50;

const METERS_PER_DEGREE_LAT: f64 = 111_319.0;

/// Turn direction around the arc centre, as seen from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl FromStr for ArcDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(ArcDirection::Clockwise),
            "-" => Ok(ArcDirection::CounterClockwise),
            other => Err(format!("unknown arc direction {:?}", other)),
        }
    }
}

// Flat-earth bearing from `from` to `to`, radians clockwise from north
fn planar_bearing(from: LatLon, to: LatLon) -> f64 {
    let d_lat = to.lat() - from.lat();
    let d_lon = to.lon() - from.lon();
    let mean_lat = ((from.lat() + to.lat()) / 2.0).to_radians();
    let bearing = (d_lon * mean_lat.cos()).atan2(d_lat);
    if bearing < 0.0 {
        bearing + 2.0 * PI
    } else {
        bearing
    }
}

fn positive_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}

/// Points along the arc from `start` to `end` around `center`, both endpoints
/// included. Always returns `ARC_SEGMENTS + 1` points.
///
/// The radius is taken from the centre to `start`; `end` only fixes where the
/// sweep stops.
pub fn arc_points(start: LatLon, end: LatLon, center: LatLon, direction: ArcDirection) -> Vec<LatLon> {
    let radius = geodesy::haversine(center, start, geodesy::WGS84_A);

    let start_bearing = planar_bearing(center, start);
    let end_bearing = planar_bearing(center, end);

    let sweep = match direction {
        ArcDirection::Clockwise => positive_angle(end_bearing - start_bearing),
        ArcDirection::CounterClockwise => -positive_angle(start_bearing - end_bearing),
    };

    let meters_per_degree_lon = METERS_PER_DEGREE_LAT * center.lat().to_radians().cos();

    (0..=ARC_SEGMENTS)
        .map(|i| {
            let t = i as f64 / ARC_SEGMENTS as f64;
            let bearing = start_bearing + sweep * t;
            let north = radius * bearing.cos();
            let east = radius * bearing.sin();
            LatLon::new(
                center.lat() + north / METERS_PER_DEGREE_LAT,
                center.lon() + east / meters_per_degree_lon,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f64 = 10_000.0;

    fn center() -> LatLon {
        LatLon::new(51.5, -1.0)
    }

    fn north_of_center() -> LatLon {
        LatLon::new(51.5 + RADIUS / METERS_PER_DEGREE_LAT, -1.0)
    }

    fn east_of_center() -> LatLon {
        let per_degree_lon = METERS_PER_DEGREE_LAT * 51.5_f64.to_radians().cos();
        LatLon::new(51.5, -1.0 + RADIUS / per_degree_lon)
    }

    fn near(a: LatLon, b: LatLon) -> bool {
        (a.lat() - b.lat()).abs() < 1e-4 && (a.lon() - b.lon()).abs() < 1e-4
    }

    #[test]
    fn direction_flags() {
        assert_eq!("+".parse::<ArcDirection>(), Ok(ArcDirection::Clockwise));
        assert_eq!(" - ".parse::<ArcDirection>(), Ok(ArcDirection::CounterClockwise));
        assert!("x".parse::<ArcDirection>().is_err());
    }

    #[test]
    fn always_fifty_one_points() {
        let points = arc_points(north_of_center(), east_of_center(), center(), ArcDirection::Clockwise);
        assert_eq!(points.len(), 51);
        let points = arc_points(east_of_center(), north_of_center(), center(), ArcDirection::CounterClockwise);
        assert_eq!(points.len(), 51);
    }

    #[test]
    fn endpoints_match() {
        for &dir in &[ArcDirection::Clockwise, ArcDirection::CounterClockwise] {
            let points = arc_points(north_of_center(), east_of_center(), center(), dir);
            assert!(near(points[0], north_of_center()), "{:?}", points[0]);
            assert!(near(points[ARC_SEGMENTS], east_of_center()), "{:?}", points[ARC_SEGMENTS]);
        }
    }

    #[test]
    fn direction_picks_the_side() {
        let cw = arc_points(north_of_center(), east_of_center(), center(), ArcDirection::Clockwise);
        let ccw = arc_points(north_of_center(), east_of_center(), center(), ArcDirection::CounterClockwise);

        // Clockwise from north to east passes through the north-east quadrant,
        // the other way round goes all the way through the south-west.
        let mid_cw = cw[ARC_SEGMENTS / 2];
        let mid_ccw = ccw[ARC_SEGMENTS / 2];
        assert!(mid_cw.lat() > center().lat() && mid_cw.lon() > center().lon());
        assert!(mid_ccw.lat() < center().lat() && mid_ccw.lon() < center().lon());
    }

    #[test]
    fn points_stay_on_the_circle() {
        let points = arc_points(north_of_center(), east_of_center(), center(), ArcDirection::Clockwise);
        for p in points {
            let r = geodesy::haversine(center(), p, geodesy::WGS84_A);
            assert!((r - RADIUS).abs() < 50.0, "radius was {}", r);
        }
    }
}
