//! Airspace features in GeoJSON, as served by openAIP style APIs.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::altitude::{Altitude, AltitudeLimit, AltitudeUnit, ReferenceDatum};
use crate::error::{Error, Result};
use crate::geo::LatLon;
use crate::openair::AirspaceRecord;

const UNNAMED: &str = "Unnamed Airspace";

// Features stay raw so that one malformed feature can be dropped on its own
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Option<Geometry>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    #[serde(rename = "NAME")]
    legacy_name: Option<String>,
    #[serde(rename = "icaoClass")]
    class: Option<Value>,
    #[serde(rename = "CLASS")]
    legacy_class: Option<Value>,
    #[serde(rename = "lowerLimit")]
    lower_limit: Option<Limit>,
    #[serde(rename = "upperLimit")]
    upper_limit: Option<Limit>,
    #[serde(rename = "AL_UNITS")]
    al_units: Option<String>,
    #[serde(rename = "AH_UNITS")]
    ah_units: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Limit {
    value: f64,
    #[serde(default)]
    unit: Option<u8>,
    #[serde(default, rename = "referenceDatum")]
    reference_datum: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl Geometry {
    // Outer ring of a polygon, or the line itself
    fn outline(&self) -> Option<Vec<LatLon>> {
        let ring = match self.kind.as_str() {
            "Polygon" => self.coordinates.get(0)?,
            "MultiPolygon" => self.coordinates.get(0)?.get(0)?,
            "LineString" => &self.coordinates,
            _ => return None,
        };
        let positions: Vec<Vec<f64>> = serde_json::from_value(ring.clone()).ok()?;
        Some(positions.iter().filter_map(|p| LatLon::from_geojson(p)).collect())
    }
}

/// Letter class for the numeric ICAO class codes.
pub fn icao_class_name(code: u64) -> &'static str {
    match code {
        1 => "A",
        2 => "B",
        3 => "C",
        4 => "D",
        5 => "E",
        6 => "F",
        7 => "G",
        8 => "Other",
        9 => "CTR",
        10 => "CTA",
        11 => "TMA",
        12 => "ATZ",
        _ => "Unknown",
    }
}

fn class_name(class: Option<&Value>) -> String {
    match class {
        Some(Value::Number(n)) => n.as_u64().map_or("Unknown", icao_class_name).to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => "Unknown".to_string(),
    }
}

impl Limit {
    fn to_altitude(&self) -> Altitude {
        let unit = match self.unit {
            Some(0) => AltitudeUnit::Meter,
            Some(6) => AltitudeUnit::FlightLevel,
            _ => AltitudeUnit::Feet,
        };
        let datum = match self.reference_datum {
            Some(0) => ReferenceDatum::Gnd,
            Some(2) => ReferenceDatum::Std,
            _ => ReferenceDatum::Msl,
        };
        Altitude::Structured {
            value: self.value,
            unit,
            datum,
        }
    }
}

fn limit(structured: &Option<Limit>, text: Option<&str>) -> Option<AltitudeLimit> {
    match (structured, text) {
        (Some(l), _) => Some(l.to_altitude().into()),
        (None, Some(t)) => Some(AltitudeLimit::parse(t)),
        (None, None) => None,
    }
}

fn get_airspace(feature: &Feature) -> Option<AirspaceRecord> {
    let points = feature.geometry.as_ref()?.outline()?;
    if points.is_empty() {
        return None;
    }

    let props = &feature.properties;
    // A legacy limit on one side only leaves the other open: GND below, UNL above
    let (al_units, ah_units) = match (props.al_units.as_deref(), props.ah_units.as_deref()) {
        (None, None) => (None, None),
        (al, ah) => (Some(al.unwrap_or("GND")), Some(ah.unwrap_or("UNL"))),
    };

    Some(AirspaceRecord {
        class: class_name(props.class.as_ref().or(props.legacy_class.as_ref())),
        name: props
            .name
            .clone()
            .or_else(|| props.legacy_name.clone())
            .unwrap_or_else(|| UNNAMED.to_string()),
        points,
        lower: limit(&props.lower_limit, al_units),
        upper: limit(&props.upper_limit, ah_units),
        frequency: None,
    })
}

/// Reads airspace records out of a GeoJSON feature collection. Features
/// that do not deserialize or have no usable outline are skipped.
pub fn parse_airspace_geojson(text: &str) -> Result<Vec<AirspaceRecord>> {
    let collection: FeatureCollection = serde_json::from_str(text)?;

    let mut airspaces = Vec::new();
    for (i, value) in collection.features.into_iter().enumerate() {
        let feature: Feature = match serde_json::from_value(value) {
            Ok(feature) => feature,
            Err(e) => {
                warn!("Feature {}: {}, ignoring!", i, e);
                continue;
            }
        };
        match get_airspace(&feature) {
            Some(airspace) => airspaces.push(airspace),
            None => warn!("Feature {}: no usable geometry, ignoring!", i),
        }
    }

    if airspaces.is_empty() {
        return Err(Error::Empty { what: "airspace records" });
    }
    Ok(airspaces)
}
