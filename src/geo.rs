use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(lat, lon)
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    /// Builds a point from a latitude and a longitude token, rejecting either
    /// one if it fails to parse or falls outside its valid range.
    pub fn from_tokens(lat: &str, lon: &str) -> Option<Self> {
        let (lat, lon) = (parse_coordinate(lat)?, parse_coordinate(lon)?);
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            warn!("Coordinate out of range: {} {}", lat, lon);
            return None;
        }
        Some(LatLon(lat, lon))
    }

    // GeoJSON positions are [lon, lat]
    pub fn from_geojson(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(LatLon(*lat, *lon)),
            _ => None,
        }
    }
}

fn to_dd(d: f64, m: f64, s: f64, dir: &str) -> f64 {
    let dd = d + m / 60.0 + s / 3600.0;
    if dir.eq_ignore_ascii_case("S") || dir.eq_ignore_ascii_case("W") {
        -dd
    } else {
        dd
    }
}

/// Converts one latitude or longitude token into signed decimal degrees.
///
/// Accepted forms, tried in order:
///
/// * bare decimal, sign included: `51.1869`, `-1.0334`
/// * degrees and decimal minutes with a hemisphere suffix, matched against
///   the whole token: `5111.60N`, `00050.50W`
/// * colon separated degrees, minutes and seconds with a hemisphere suffix:
///   `51:11:36N`
///
/// Returns `None` (after logging a warning) for anything else.
pub fn parse_coordinate(token: &str) -> Option<f64> {
    lazy_static! {
        static ref HEMISPHERE_REGEX: Regex = Regex::new(r"(?i)[NSEW]").unwrap();
        static ref DDM_REGEX: Regex =
            Regex::new(r"(?i)^(\d{1,3})(\d{2}\.\d+)([NSEW])$").unwrap();
        static ref DMS_REGEX: Regex =
            Regex::new(r"(?i)(\d+):(\d+):(\d+(?:\.\d+)?)([NSEW])").unwrap();
    }

    let token = token.trim().trim_matches('"').trim();

    if !HEMISPHERE_REGEX.is_match(token) {
        if let Ok(dd) = token.parse::<f64>() {
            if dd.is_finite() {
                return Some(dd);
            }
        }
    }

    let ddm = DDM_REGEX.captures(token).and_then(|cap| {
        let (d, m) = (cap[1].parse().ok()?, cap[2].parse().ok()?);
        Some(to_dd(d, m, 0.0, &cap[3]))
    });
    if ddm.is_some() {
        return ddm;
    }

    let dms = DMS_REGEX.captures(token).and_then(|cap| {
        let (d, m, s) = (cap[1].parse().ok()?, cap[2].parse().ok()?, cap[3].parse().ok()?);
        Some(to_dd(d, m, s, &cap[4]))
    });
    if dms.is_none() {
        warn!("Could not parse coordinate: {}", token);
    }
    dms
}

/// Splits a whitespace separated coordinate pair into tokens, gluing a lone
/// hemisphere letter onto the token before it (`51:11:36 N` -> `51:11:36N`).
pub fn coordinate_tokens(s: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for part in s.split_whitespace() {
        let is_hemisphere = part.len() == 1 && "NSEWnsew".contains(part);
        match tokens.last_mut() {
            Some(last) if is_hemisphere => last.push_str(part),
            _ => tokens.push(part.to_string()),
        }
    }
    tokens
}
