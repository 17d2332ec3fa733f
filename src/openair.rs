//! OpenAir style airspace files.
//!
//! Each airspace block starts with `AC` and is followed by directives that
//! name it, set its limits and describe its boundary. Boundaries are built
//! from `DP` points and `DB` arcs, the latter using the centre (`V X=`) and
//! direction (`V D=`) set beforehand.

use tracing::{debug, warn};

use crate::altitude::AltitudeLimit;
use crate::arc::{arc_points, ArcDirection};
use crate::error::{Error, Result};
use crate::geo::{coordinate_tokens, LatLon};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AirspaceRecord {
    pub class: String,
    pub name: String,
    pub points: Vec<LatLon>,
    pub lower: Option<AltitudeLimit>,
    pub upper: Option<AltitudeLimit>,
    pub frequency: Option<String>,
}

impl AirspaceRecord {
    pub fn new(class: &str) -> Self {
        AirspaceRecord {
            class: class.to_string(),
            ..AirspaceRecord::default()
        }
    }

    /// A polygon rather than an open line.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    pub fn lower_feet(&self) -> Option<f64> {
        self.lower.as_ref().and_then(AltitudeLimit::feet)
    }

    pub fn upper_feet(&self) -> Option<f64> {
        self.upper.as_ref().and_then(AltitudeLimit::feet)
    }
}

// The record being assembled, with any arc parameters waiting for a `DB`
struct Pending {
    record: AirspaceRecord,
    direction: Option<ArcDirection>,
    center: Option<LatLon>,
}

impl Pending {
    fn new(class: &str) -> Self {
        Pending {
            record: AirspaceRecord::new(class),
            direction: None,
            center: None,
        }
    }

    fn add_point(&mut self, line_no: usize, rest: &str) {
        match point(rest) {
            Some(p) => self.record.points.push(p),
            None => warn!("Line {}: bad DP point {:?}, ignoring!", line_no, rest),
        }
    }

    fn set_variable(&mut self, line_no: usize, rest: &str) {
        let (key, value) = match rest.find('=') {
            Some(i) => (rest[..i].trim(), rest[i + 1..].trim()),
            None => {
                warn!("Line {}: bad V directive {:?}, ignoring!", line_no, rest);
                return;
            }
        };
        match key.to_ascii_uppercase().as_str() {
            "D" => match value.parse() {
                Ok(dir) => self.direction = Some(dir),
                Err(e) => warn!("Line {}: {}", line_no, e),
            },
            "X" => match point(value) {
                Some(center) => self.center = Some(center),
                None => warn!("Line {}: bad arc centre {:?}, ignoring!", line_no, value),
            },
            _ => debug!("Line {}: ignoring variable {}", line_no, key),
        }
    }

    fn add_arc(&mut self, line_no: usize, rest: &str) {
        let (direction, center) = match (self.direction, self.center) {
            (Some(direction), Some(center)) => (direction, center),
            _ => {
                warn!("Line {}: DB without arc centre and direction, ignoring!", line_no);
                return;
            }
        };
        self.direction = None;
        self.center = None;

        let mut ends = rest.splitn(2, ',').map(point);
        match (ends.next().flatten(), ends.next().flatten()) {
            (Some(start), Some(end)) => {
                self.record.points.extend(arc_points(start, end, center, direction));
            }
            _ => warn!("Line {}: bad DB endpoints {:?}, ignoring!", line_no, rest),
        }
    }
}

fn point(s: &str) -> Option<LatLon> {
    match coordinate_tokens(s).as_slice() {
        [lat, lon] => LatLon::from_tokens(lat, lon),
        _ => None,
    }
}

fn split_directive(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], line[i..].trim()),
        None => (line, ""),
    }
}

/// Parses an OpenAir style airspace file into one record per `AC` block, in
/// file order.
///
/// Lines that cannot be used are logged and skipped. An input without any
/// airspace block is `Error::Empty`.
pub fn parse_openair(text: &str) -> Result<Vec<AirspaceRecord>> {
    let mut airspaces = Vec::new();
    let mut current: Option<Pending> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('*') {
            continue;
        }

        let (directive, rest) = split_directive(line);
        let directive = directive.to_ascii_uppercase();

        if directive == "AC" {
            if let Some(done) = current.take() {
                airspaces.push(done.record);
            }
            current = Some(Pending::new(rest));
            continue;
        }

        let pending = match current.as_mut() {
            Some(pending) => pending,
            None => {
                debug!("Line {}: {} outside of an airspace block, ignoring", line_no, directive);
                continue;
            }
        };

        match directive.as_str() {
            "AN" => pending.record.name = rest.to_string(),
            "AF" => pending.record.frequency = Some(rest.to_string()),
            "AL" => pending.record.lower = Some(AltitudeLimit::parse(rest)),
            "AH" => pending.record.upper = Some(AltitudeLimit::parse(rest)),
            "DP" => pending.add_point(line_no, rest),
            "V" => pending.set_variable(line_no, rest),
            "DB" => pending.add_arc(line_no, rest),
            _ => debug!("Line {}: ignoring {}", line_no, directive),
        }
    }

    if let Some(done) = current {
        airspaces.push(done.record);
    }

    if airspaces.is_empty() {
        return Err(Error::Empty { what: "airspace records" });
    }
    Ok(airspaces)
}
