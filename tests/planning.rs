use soaring_task::arc::ARC_SEGMENTS;
use soaring_task::{parse_openair, parse_turnpoints, Error, ScoringMethod, Task, TurnpointSet};

const TURNPOINTS: &str = r#"name,code,country,lat,lon,elev,style,rwdir,rwlen,freq,desc
"Lasham","LAS",UK,5111.214N,00101.998W,180.0m,5,090,1100m,,"Lasham Airfield"
"Booker","BOO",UK,5136.918N,00048.510W,159.0m,5,070,800m,,"Wycombe Air Park"
"Broken","BRK",UK,99xx.000N,00048.510W,159.0m,5,070,800m,,"Nowhere"
"Dunstable","DUN",UK,5152.986N,00032.616W,152.0m,5,060,900m,,"London Gliding Club"
"Gransden","GRA",UK,52.1831,-0.1917
-----Related Tasks-----
"#;

const AIRSPACE: &str = "\
* Test airspace
AC CTR
AN Farnborough CTR
AF 134.355
AL SFC
AH 2500ft
DP 51:20:00 N 000:50:00 W
V D=+
V X=51:16:30 N 000:46:30 W
DB 51:20:00 N 000:50:00 W,51:13:00 N 000:43:00 W
DP 51:20:00 N 000:50:00 W

AC D
AN Benson
AL 1000m
AH FL65
DP 5140.00N 00110.00W
DP 5136.00N 00105.00W
";

#[test]
fn malformed_turnpoint_lines_are_dropped_in_order() {
    let points = parse_turnpoints(TURNPOINTS).unwrap();
    let codes: Vec<_> = points.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes, vec!["LAS", "BOO", "DUN", "GRA"]);
}

#[test]
fn plan_a_triangle_from_a_file() {
    let set = TurnpointSet::from(parse_turnpoints(TURNPOINTS).unwrap());
    let mut task = Task::new(ScoringMethod::Fai);
    for ident in &["Lasham", "dun", "Gransden (GRA)", "LAS"] {
        assert!(task.append(set.lookup(ident).unwrap().clone()));
    }
    assert!(!task.append(set.lookup("LAS").unwrap().clone()));
    assert_eq!(task.len(), 4);

    let legs: Vec<_> = task.legs().collect();
    assert_eq!(legs.len(), 3);
    assert!(legs.iter().all(|l| l.distance_km > 0.0));
    assert!(legs.iter().all(|l| l.bearing_deg >= 0.0 && l.bearing_deg < 360.0));

    let fai_total = task.total_distance_km();
    let sum: f64 = legs.iter().map(|l| l.distance_km).sum();
    assert!((fai_total - sum).abs() < 1e-9);

    // Lasham - Dunstable - Gransden is far too long and thin
    assert!(!task.is_fai28_triangle());

    task.set_scoring(ScoringMethod::Barrels);
    assert!((fai_total - task.total_distance_km() - 2.0).abs() < 1e-9);
}

#[test]
fn airspace_with_arcs() {
    let airspaces = parse_openair(AIRSPACE).unwrap();
    assert_eq!(airspaces.len(), 2);

    let ctr = &airspaces[0];
    assert_eq!(ctr.class, "CTR");
    assert_eq!(ctr.name, "Farnborough CTR");
    assert_eq!(ctr.frequency.as_deref(), Some("134.355"));
    assert_eq!(ctr.lower_feet(), Some(0.0));
    assert_eq!(ctr.upper_feet(), Some(2500.0));
    assert_eq!(ctr.points.len(), 1 + ARC_SEGMENTS + 1 + 1);
    assert!(ctr.is_closed());

    let benson = &airspaces[1];
    assert_eq!(benson.class, "D");
    assert!((benson.lower_feet().unwrap() - 3280.84).abs() < 1e-6);
    assert_eq!(benson.upper_feet(), Some(6500.0));
    assert_eq!(benson.points.len(), 2);
}

#[test]
fn empty_inputs_ask_for_a_fallback() {
    assert!(matches!(parse_turnpoints(""), Err(Error::Empty { .. })));
    assert!(matches!(parse_openair("* only comments"), Err(Error::Empty { .. })));
    assert_eq!(TurnpointSet::sample().len(), 6);
}
