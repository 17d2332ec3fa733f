use std::fmt;

use crate::geo::LatLon;

#[derive(Clone, Debug, PartialEq, Builder)]
#[builder(setter(into))]
pub struct Turnpoint {
    pub name: String,
    pub code: String,
    #[builder(default)]
    pub country: Option<String>,
    pub latlon: LatLon,
    #[builder(default)]
    pub description: String,
}

impl Turnpoint {
    pub fn new(name: &str, code: &str, latlon: LatLon, description: &str) -> Self {
        Turnpoint {
            name: name.to_string(),
            code: code.to_string(),
            country: None,
            latlon,
            description: description.to_string(),
        }
    }
}

impl fmt::Display for Turnpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const MIN_SEARCH_LEN: usize = 2;
const MAX_SUGGESTIONS: usize = 20;

/// The turnpoints currently loaded. Replaced as a whole on reload.
#[derive(Clone, Debug, Default)]
pub struct TurnpointSet {
    points: Vec<Turnpoint>,
}

impl TurnpointSet {
    pub fn new(points: Vec<Turnpoint>) -> Self {
        TurnpointSet { points }
    }

    /// UK gliding sites used when no turnpoint file could be loaded.
    pub fn sample() -> Self {
        TurnpointSet::new(vec![
            Turnpoint::new("Lasham", "LAS", LatLon::new(51.1869, -1.0334), "Lasham Airfield"),
            Turnpoint::new("Booker", "BOO", LatLon::new(51.6153, -0.8085), "Wycombe Air Park"),
            Turnpoint::new("Dunstable", "DUN", LatLon::new(51.8831, -0.5436), "London Gliding Club"),
            Turnpoint::new("Ridgewell", "RID", LatLon::new(52.0053, 0.5097), "Ridgewell Airfield"),
            Turnpoint::new("Gransden", "GRA", LatLon::new(52.1831, -0.1917), "Gransden Lodge"),
            Turnpoint::new("Sutton Bank", "SUT", LatLon::new(54.2667, -1.2167), "Yorkshire Gliding Club"),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Turnpoint> {
        self.points.iter()
    }

    pub fn by_code(&self, code: &str) -> Option<&Turnpoint> {
        self.points.iter().find(|p| p.code == code)
    }

    /// Finds a turnpoint by name, code or `Name (CODE)`, ignoring case.
    pub fn lookup(&self, ident: &str) -> Option<&Turnpoint> {
        let ident = ident.trim().to_lowercase();
        if ident.is_empty() {
            return None;
        }
        self.points.iter().find(|p| {
            p.name.to_lowercase() == ident
                || p.code.to_lowercase() == ident
                || p.to_string().to_lowercase() == ident
        })
    }

    /// Turnpoints whose name or code contains `term`. Terms shorter than two
    /// characters match nothing.
    pub fn search(&self, term: &str) -> Vec<&Turnpoint> {
        let term = term.trim().to_lowercase();
        if term.chars().count() < MIN_SEARCH_LEN {
            return Vec::new();
        }
        self.points
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term) || p.code.to_lowercase().contains(&term))
            .collect()
    }

    /// `Name (CODE)` labels for an autocomplete list.
    pub fn suggestions(&self, term: &str) -> Vec<String> {
        let term = term.trim().to_lowercase();
        self.points
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term) || p.code.to_lowercase().contains(&term))
            .take(MAX_SUGGESTIONS)
            .map(|p| p.to_string())
            .collect()
    }
}

impl From<Vec<Turnpoint>> for TurnpointSet {
    fn from(points: Vec<Turnpoint>) -> Self {
        TurnpointSet::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_six_sites() {
        let set = TurnpointSet::sample();
        assert_eq!(set.len(), 6);
        assert_eq!(set.by_code("SUT").unwrap().name, "Sutton Bank");
    }

    #[test]
    fn lookup_by_name_code_or_label() {
        let set = TurnpointSet::sample();
        assert_eq!(set.lookup("lasham").unwrap().code, "LAS");
        assert_eq!(set.lookup("LAS").unwrap().code, "LAS");
        assert_eq!(set.lookup("Lasham (LAS)").unwrap().code, "LAS");
        assert!(set.lookup("Lash").is_none());
        assert!(set.lookup("").is_none());
    }

    #[test]
    fn search_needs_two_characters() {
        let set = TurnpointSet::sample();
        assert!(set.search("a").is_empty());
        let found: Vec<_> = set.search("an").into_iter().map(|p| p.code.as_str()).collect();
        assert_eq!(found, vec!["GRA", "SUT"]);
    }

    #[test]
    fn suggestions_are_labels() {
        let set = TurnpointSet::sample();
        assert_eq!(set.suggestions("boo"), vec!["Booker (BOO)"]);
        assert_eq!(set.suggestions("").len(), 6);
    }

    #[test]
    fn builder_requires_position() {
        assert!(TurnpointBuilder::default().name("X").code("X").build().is_err());
        let tp = TurnpointBuilder::default()
            .name("Lasham")
            .code("LAS")
            .country("UK".to_string())
            .latlon(LatLon::new(51.1869, -1.0334))
            .build()
            .unwrap();
        assert_eq!(tp.country.as_deref(), Some("UK"));
        assert_eq!(tp.description, "");
    }
}
