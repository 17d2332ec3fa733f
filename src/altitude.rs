use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

pub const FEET_PER_METER: f64 = 3.28084;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AltitudeUnit {
    Feet,
    Meter,
    FlightLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceDatum {
    Gnd,
    Msl,
    Std,
}

/// An altitude either already normalised to feet, or as published by a
/// structured source together with its unit and reference datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Altitude {
    Scalar(f64),
    Structured {
        value: f64,
        unit: AltitudeUnit,
        datum: ReferenceDatum,
    },
}

impl Altitude {
    /// Value in feet. Heights above ground never go negative.
    pub fn feet(self) -> f64 {
        match self {
            Altitude::Scalar(ft) => ft,
            Altitude::Structured { value, unit, datum } => {
                let ft = match unit {
                    AltitudeUnit::Feet => value,
                    AltitudeUnit::Meter => value * FEET_PER_METER,
                    AltitudeUnit::FlightLevel => value * 100.0,
                };
                if datum == ReferenceDatum::Gnd {
                    ft.max(0.0)
                } else {
                    ft
                }
            }
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ft = self.feet().round();
        match *self {
            Altitude::Scalar(_) => write!(f, "{}ft", ft),
            Altitude::Structured { datum: ReferenceDatum::Gnd, .. } if ft == 0.0 => {
                write!(f, "GND")
            }
            Altitude::Structured { datum: ReferenceDatum::Gnd, .. } => write!(f, "{}ft GND", ft),
            Altitude::Structured { datum: ReferenceDatum::Std, .. } => {
                write!(f, "FL{}", (ft / 100.0).round())
            }
            Altitude::Structured { datum: ReferenceDatum::Msl, .. } => write!(f, "{}ft", ft),
        }
    }
}

/// An airspace limit as written in the source, next to its parsed value.
#[derive(Clone, Debug, PartialEq)]
pub struct AltitudeLimit {
    pub text: String,
    pub altitude: Option<Altitude>,
}

impl AltitudeLimit {
    pub fn parse(text: &str) -> Self {
        AltitudeLimit {
            text: text.trim().to_string(),
            altitude: parse_altitude(text).map(Altitude::Scalar),
        }
    }

    pub fn feet(&self) -> Option<f64> {
        self.altitude.map(Altitude::feet)
    }
}

impl From<Altitude> for AltitudeLimit {
    fn from(altitude: Altitude) -> Self {
        AltitudeLimit {
            text: altitude.to_string(),
            altitude: Some(altitude),
        }
    }
}

// Float prefix of `s`, the way "2000 amsl" reads as 2000
fn leading_number(s: &str) -> Option<f64> {
    lazy_static! {
        static ref NUMBER_REGEX: Regex =
            Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").unwrap();
    }
    NUMBER_REGEX
        .find(s.trim())
        .and_then(|m| m.as_str().parse().ok())
}

/// Normalises a free-form altitude (`3500ft`, `FL65`, `1000m`, `GND`) to feet.
pub fn parse_altitude(s: &str) -> Option<f64> {
    let s = s.trim().to_lowercase();
    if s.contains("ft") {
        leading_number(&s.replacen("ft", "", 1))
    } else if s.contains("fl") {
        leading_number(&s.replacen("fl", "", 1)).map(|fl| fl * 100.0)
    } else if s.contains('m') {
        leading_number(&s.replacen('m', "", 1)).map(|m| m * FEET_PER_METER)
    } else if s == "gnd" || s == "sfc" {
        Some(0.0)
    } else {
        leading_number(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!(parse_altitude("3500ft"), Some(3500.0));
        assert_eq!(parse_altitude("FL65"), Some(6500.0));
        assert_eq!(parse_altitude("fl 105"), Some(10500.0));
        assert!((parse_altitude("1000m").unwrap() - 3280.84).abs() < 1e-6);
        assert_eq!(parse_altitude("GND"), Some(0.0));
        assert_eq!(parse_altitude("sfc"), Some(0.0));
        assert_eq!(parse_altitude("2500"), Some(2500.0));
        assert_eq!(parse_altitude("2000ft amsl"), Some(2000.0));
    }

    #[test]
    fn unparseable_is_none() {
        assert_eq!(parse_altitude(""), None);
        assert_eq!(parse_altitude("UNL"), None);
        assert_eq!(parse_altitude("ft"), None);
    }

    #[test]
    fn structured_normalises_to_feet() {
        let fl = Altitude::Structured {
            value: 65.0,
            unit: AltitudeUnit::FlightLevel,
            datum: ReferenceDatum::Std,
        };
        assert_eq!(fl.feet(), 6500.0);
        assert_eq!(fl.to_string(), "FL65");

        let agl = Altitude::Structured {
            value: -50.0,
            unit: AltitudeUnit::Feet,
            datum: ReferenceDatum::Gnd,
        };
        assert_eq!(agl.feet(), 0.0);
        assert_eq!(agl.to_string(), "GND");

        let msl = Altitude::Structured {
            value: 1000.0,
            unit: AltitudeUnit::Meter,
            datum: ReferenceDatum::Msl,
        };
        assert_eq!(msl.to_string(), "3281ft");
    }

    #[test]
    fn limit_keeps_source_text() {
        let limit = AltitudeLimit::parse(" FL65 ");
        assert_eq!(limit.text, "FL65");
        assert_eq!(limit.feet(), Some(6500.0));
        assert_eq!(AltitudeLimit::parse("UNL").feet(), None);
    }
}
