#![forbid(unsafe_code)]

//! Turnpoint and airspace parsing, geodesy and task checking for planning
//! soaring tasks.

#[macro_use]
extern crate derive_builder;

pub mod altitude;
pub mod arc;
pub mod cup;
pub mod error;
pub mod geo;
pub mod geodesy;
pub mod geojson;
pub mod openair;
pub mod task;
pub mod turnpoint;
pub mod txt_data;

pub use altitude::{parse_altitude, Altitude, AltitudeLimit};
pub use arc::{arc_points, ArcDirection};
pub use cup::parse_turnpoints;
pub use error::{Error, Result};
pub use geo::{parse_coordinate, LatLon};
pub use geodesy::{bearing_deg, distance_km};
pub use geojson::parse_airspace_geojson;
pub use openair::{parse_openair, AirspaceRecord};
pub use task::{validate_fai28, Leg, ScoringMethod, Task};
pub use turnpoint::{Turnpoint, TurnpointSet};
