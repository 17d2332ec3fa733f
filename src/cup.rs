//! Turnpoint files in the comma separated layout SeeYou uses:
//!
//! ```text
//! name,code,country,lat,lon,elev,style,rwdir,rwlen,freq,desc
//! "Lasham","LAS",UK,5111.214N,00101.998W,180.0m,5,090,1100m,,"Lasham Airfield"
//! ```
//!
//! Only the name, code, country, position and description columns are used.

use tracing::warn;

use crate::error::{Error, Result};
use crate::geo::LatLon;
use crate::turnpoint::{Turnpoint, TurnpointBuilder};
use crate::txt_data::{records, Record};

const MIN_FIELDS: usize = 5;
const DESCRIPTION_FIELD: usize = 10;

fn get_turnpoint(record: &Record) -> Result<Turnpoint> {
    let mut turnpoint = TurnpointBuilder::default();

    turnpoint.name(record[0]).code(record[1]);
    if !record[2].is_empty() {
        turnpoint.country(record[2].to_string());
    }
    if let Some(latlon) = LatLon::from_tokens(record[3], record[4]) {
        turnpoint.latlon(latlon);
    }
    if let Some(desc) = record.get(DESCRIPTION_FIELD) {
        turnpoint.description(desc);
    }

    turnpoint.build().map_err(|_| Error::NotYielded)
}

/// Parses a turnpoint file. Lines that are too short or whose position does
/// not parse are skipped; the rest keep their order.
///
/// An input without a single usable turnpoint is `Error::Empty`, so callers
/// can substitute a fallback set.
pub fn parse_turnpoints(text: &str) -> Result<Vec<Turnpoint>> {
    let mut turnpoints = Vec::new();

    for record in records(text) {
        if record.len() < MIN_FIELDS {
            warn!("Line {}: expected at least {} fields, ignoring!", record.line, MIN_FIELDS);
            continue;
        }
        match get_turnpoint(&record) {
            Ok(tp) => turnpoints.push(tp),
            Err(Error::NotYielded) => {
                warn!("Line {}: bad lat/lon on turnpoint {}, ignoring!", record.line, record[1]);
            }
            Err(e) => return Err(e),
        }
    }

    if turnpoints.is_empty() {
        return Err(Error::Empty { what: "turnpoints" });
    }
    Ok(turnpoints)
}
