//! The task being planned: an ordered list of turnpoints, its legs and
//! distance, and the FAI 28% triangle check.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::geodesy::{bearing_deg, distance_km};
use crate::turnpoint::Turnpoint;

/// Shortest leg of an FAI triangle, as a fraction of the total distance.
pub const FAI_MIN_LEG_RATIO: f64 = 0.28;
const FAI_MIN_POINTS: usize = 4;
const FAI_MAX_POINTS: usize = 6;

/// Deducted per intermediate turnpoint under barrel scoring.
const BARREL_DEDUCTION_KM: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringMethod {
    Fai,
    Barrels,
}

impl Default for ScoringMethod {
    fn default() -> Self {
        ScoringMethod::Fai
    }
}

impl FromStr for ScoringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fai" => Ok(ScoringMethod::Fai),
            "barrels" => Ok(ScoringMethod::Barrels),
            other => Err(format!("unknown scoring method {:?}", other)),
        }
    }
}

impl fmt::Display for ScoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoringMethod::Fai => write!(f, "fai"),
            ScoringMethod::Barrels => write!(f, "barrels"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub distance_km: f64,
    pub bearing_deg: f64,
}

impl Leg {
    pub fn between(from: &Turnpoint, to: &Turnpoint) -> Self {
        Leg {
            distance_km: distance_km(from.latlon, to.latlon),
            bearing_deg: bearing_deg(from.latlon, to.latlon),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPointRole {
    Start,
    Turnpoint(usize),
    Finish,
}

impl fmt::Display for TaskPointRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            TaskPointRole::Start => "Start".to_string(),
            TaskPointRole::Turnpoint(n) => format!("TP{}", n),
            TaskPointRole::Finish => "Finish".to_string(),
        };
        f.pad(&label)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Task {
    points: Vec<Turnpoint>,
    scoring: ScoringMethod,
}

impl Task {
    pub fn new(scoring: ScoringMethod) -> Self {
        Task {
            points: Vec::new(),
            scoring,
        }
    }

    pub fn points(&self) -> &[Turnpoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn scoring(&self) -> ScoringMethod {
        self.scoring
    }

    pub fn set_scoring(&mut self, scoring: ScoringMethod) {
        self.scoring = scoring;
    }

    /// Appends `point` unless it is already the last point of the task.
    pub fn append(&mut self, point: Turnpoint) -> bool {
        if let Some(last) = self.points.last() {
            if last.code == point.code {
                return false;
            }
        }
        self.points.push(point);
        true
    }

    /// Removes the point at `index`. An index past the end changes nothing.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.points.len() {
            self.points.remove(index);
            true
        } else {
            false
        }
    }

    /// Puts `point` at `index`. Replacing a point with itself, or an index
    /// past the end, changes nothing.
    pub fn replace_at(&mut self, index: usize, point: Turnpoint) -> bool {
        match self.points.get_mut(index) {
            Some(existing) if existing.code != point.code => {
                *existing = point;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Legs between consecutive points, computed from the task as it is now.
    pub fn legs(&self) -> impl Iterator<Item = Leg> + '_ {
        self.points.iter().tuple_windows().map(|(a, b)| Leg::between(a, b))
    }

    /// Total task distance in km under the task's scoring method.
    pub fn total_distance_km(&self) -> f64 {
        let total: f64 = self.legs().map(|leg| leg.distance_km).sum();
        match self.scoring {
            ScoringMethod::Barrels if self.points.len() > 2 => {
                let intermediate = (self.points.len() - 2) as f64;
                (total - intermediate * BARREL_DEDUCTION_KM).max(0.0)
            }
            _ => total,
        }
    }

    pub fn role(&self, index: usize) -> Option<TaskPointRole> {
        let len = self.points.len();
        if index >= len {
            None
        } else if index == 0 {
            Some(TaskPointRole::Start)
        } else if index == len - 1 {
            Some(TaskPointRole::Finish)
        } else {
            Some(TaskPointRole::Turnpoint(index))
        }
    }

    pub fn is_fai28_triangle(&self) -> bool {
        validate_fai28(&self.points)
    }
}

/// Checks a closed task against the FAI 28% rule: 4 to 6 points, finishing
/// where it started, no turnpoint used twice, and no leg shorter than 28% of
/// the total distance.
///
/// The rule is provisional and only covers what is described above.
pub fn validate_fai28(points: &[Turnpoint]) -> bool {
    if points.len() < FAI_MIN_POINTS || points.len() > FAI_MAX_POINTS {
        return false;
    }

    let (first, last) = (&points[0], &points[points.len() - 1]);
    if first.code != last.code {
        return false;
    }

    let interior = &points[1..points.len() - 1];
    let mut seen = HashSet::new();
    for p in interior {
        if p.code == first.code || !seen.insert(p.code.as_str()) {
            return false;
        }
    }

    let legs: Vec<f64> = points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance_km(a.latlon, b.latlon))
        .collect();
    let total: f64 = legs.iter().sum();
    if total <= 0.0 {
        return false;
    }
    let shortest = legs.iter().cloned().fold(f64::INFINITY, f64::min);
    shortest / total >= FAI_MIN_LEG_RATIO
}
