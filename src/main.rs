#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::path::{Path, PathBuf};

use structopt::StructOpt;
use tracing::{info, warn, Level};

use soaring_task::geodesy::format_bearing;
use soaring_task::txt_data::DataFile;
use soaring_task::{
    parse_airspace_geojson, parse_openair, parse_turnpoints, AirspaceRecord, ScoringMethod, Task,
    TurnpointSet,
};

#[derive(StructOpt)]
#[structopt(name = "soaring_task", about = "Plan and check a soaring task")]
struct Args {
    #[structopt(short = "t", long = "turnpoints", parse(from_os_str))]
    turnpoints: Option<PathBuf>,
    #[structopt(short = "a", long = "airspace", parse(from_os_str))]
    airspace: Option<PathBuf>,
    #[structopt(
        short = "s",
        long = "scoring",
        default_value = "fai",
        possible_values = &["fai", "barrels"]
    )]
    scoring: ScoringMethod,
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
    /// Turnpoints of the task, by code, name or "Name (CODE)"
    #[structopt(name = "task")]
    task: Vec<String>,
}

fn load_turnpoints(path: Option<&Path>) -> TurnpointSet {
    let path = match path {
        Some(path) => path,
        None => {
            info!("No turnpoint file given, using sample turnpoints");
            return TurnpointSet::sample();
        }
    };

    match DataFile::from_file(path).and_then(|file| parse_turnpoints(file.text())) {
        Ok(points) => {
            info!("Loaded {} turnpoints from {}", points.len(), path.display());
            points.into()
        }
        Err(e) => {
            warn!("{}: {}. Loading sample turnpoints.", path.display(), e);
            TurnpointSet::sample()
        }
    }
}

fn load_airspace(path: &Path) -> soaring_task::Result<Vec<AirspaceRecord>> {
    let file = DataFile::from_file(path)?;
    let ext = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    let is_geojson = matches!(ext.as_deref(), Some("geojson") | Some("json"));

    if is_geojson {
        parse_airspace_geojson(file.text())
    } else {
        parse_openair(file.text())
    }
}

fn print_airspace(airspaces: &[AirspaceRecord]) {
    println!("[AIRSPACE]");
    for a in airspaces {
        let limit = |l: &Option<soaring_task::AltitudeLimit>| {
            l.as_ref().map_or_else(|| "?".to_string(), |l| l.text.clone())
        };
        println!(
            "{:6} {:30} {} - {} ({} points, {})",
            a.class,
            a.name,
            limit(&a.lower),
            limit(&a.upper),
            a.points.len(),
            if a.is_closed() { "closed" } else { "open" }
        );
    }
}

fn print_task(task: &Task) {
    println!("[TASK] scoring: {}", task.scoring());
    for (i, point) in task.points().iter().enumerate() {
        if let Some(role) = task.role(i) {
            println!("{:7} {}", role, point);
        }
    }
    for (leg, pair) in task.legs().zip(task.points().windows(2)) {
        println!(
            "{:>4} -> {:4} {:7.1} km  {}",
            pair[0].code,
            pair[1].code,
            leg.distance_km,
            format_bearing(leg.bearing_deg)
        );
    }
    println!("Total: {:.1} km", task.total_distance_km());
    println!(
        "FAI 28%: {}",
        if task.is_fai28_triangle() { "valid" } else { "not valid" }
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::from_args();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let turnpoints = load_turnpoints(args.turnpoints.as_deref());

    if let Some(path) = &args.airspace {
        match load_airspace(path) {
            Ok(airspaces) => print_airspace(&airspaces),
            Err(e) => warn!("{}: {}", path.display(), e),
        }
    }

    let mut task = Task::new(args.scoring);
    for ident in &args.task {
        let point = turnpoints
            .lookup(ident)
            .ok_or_else(|| soaring_task::Error::UnknownTurnpoint { ident: ident.clone() })?;
        if !task.append(point.clone()) {
            warn!("{} is already the last point of the task, skipping", point);
        }
    }

    if !task.is_empty() {
        print_task(&task);
    }
    Ok(())
}
