use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use clap::builder::PossibleValuesParser;
use time::OffsetDateTime;
use orbits::{Body, IntegratorSettings, OutputGrid, Trajectory};
use orbits::bodies::load_bodies;
use orbits::bodies::presets::{preset, preset_names};
use orbits::tools::{timestamp, compute_total_energy, compute_total_momentum};

// Relative energy drift above which the run is reported as inaccurate
const ENERGY_DRIFT_WARNING : f64 = 1e-4;

struct Run {
    bodies: Vec<Body>,
    t0: f64,
    t1: f64,
    grid: OutputGrid,
    settings: IntegratorSettings,
    output_path: PathBuf,
    silent_mode: bool,
}

fn main() {
    let start = OffsetDateTime::now_utc();
    let matches = cli().get_matches();

    let silent_mode = match matches.subcommand() {
        Some((_, sub_matches)) => sub_matches.get_flag("silent"),
        None => false,
    };
    let result = match matches.subcommand() {
        Some(("start", start_matches)) => prepare_start(start_matches).and_then(simulate),
        Some(("preset", preset_matches)) => prepare_preset(preset_matches).and_then(simulate),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        println!("[ERROR {} UTC] {}", timestamp(), e);
        process::exit(1);
    }
    if !silent_mode {
        let elapsed = OffsetDateTime::now_utc() - start;
        println!("[INFO {} UTC] Execution time: {} seconds", timestamp(), elapsed.as_seconds_f64());
    }
}

fn cli() -> Command {
    Command::new("orbits")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Planar gravitational N-body integrator (adaptive 8th order Runge-Kutta)")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(integration_args(Command::new("start")
                .about("Integrate the bodies described in a JSON file")
                .arg(Arg::new("bodies_filename")
                    .required(true)
                    .index(1)
                    .help("JSON array of bodies (name, mass, x, y, vx, vy)"))
                .arg(Arg::new("output_filename")
                    .required(true)
                    .index(2)
                    .help("CSV trajectory filename"))
                .arg(Arg::new("t0")
                    .long("t0")
                    .value_name("time")
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(f64))
                    .default_value("0")
                    .help("Initial time"))
                .arg(Arg::new("t1")
                    .long("t1")
                    .value_name("time")
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(f64))
                    .required(true)
                    .help("Final time (can be earlier than the initial time)"))))
        .subcommand(integration_args(Command::new("preset")
                .about("Integrate one of the built-in configurations")
                .arg(Arg::new("preset_name")
                    .required(true)
                    .index(1)
                    .value_parser(PossibleValuesParser::new(preset_names()))
                    .help("Preset name"))
                .arg(Arg::new("output_filename")
                    .required(true)
                    .index(2)
                    .help("CSV trajectory filename"))))
}

fn integration_args(command: Command) -> Command {
    command
        .arg(Arg::new("samples")
            .long("samples")
            .value_name("count")
            .value_parser(value_parser!(usize))
            .conflicts_with("step")
            .help("Number of evenly spaced output times, both ends included"))
        .arg(Arg::new("step")
            .long("step")
            .value_name("time")
            .value_parser(value_parser!(f64))
            .help("Spacing between output times (adjusted to end exactly on the final time)"))
        .arg(Arg::new("rtol")
            .long("rtol")
            .value_parser(value_parser!(f64))
            .help("Relative tolerance per component"))
        .arg(Arg::new("atol")
            .long("atol")
            .value_parser(value_parser!(f64))
            .help("Absolute tolerance per component"))
        .arg(Arg::new("silent")
            .short('s')
            .long("silent")
            .action(ArgAction::SetTrue)
            .help("Only print WARNING/ERROR messages"))
}

fn settings(matches: &ArgMatches) -> IntegratorSettings {
    let mut settings = IntegratorSettings::default();
    if let Some(&relative_tolerance) = matches.get_one::<f64>("rtol") {
        settings.relative_tolerance = relative_tolerance;
    }
    if let Some(&absolute_tolerance) = matches.get_one::<f64>("atol") {
        settings.absolute_tolerance = absolute_tolerance;
    }
    settings
}

fn grid(matches: &ArgMatches, default_samples: usize) -> OutputGrid {
    match (matches.get_one::<usize>("samples"), matches.get_one::<f64>("step")) {
        (Some(&samples), _) => OutputGrid::Samples(samples),
        (None, Some(&time_step)) => OutputGrid::Step(time_step),
        (None, None) => OutputGrid::Samples(default_samples),
    }
}

fn output_path(matches: &ArgMatches) -> PathBuf {
    matches.get_one::<String>("output_filename").map(PathBuf::from).unwrap_or_default()
}

fn prepare_start(matches: &ArgMatches) -> Result<Run, Box<dyn Error>> {
    let silent_mode = matches.get_flag("silent");
    let bodies_filename = matches.get_one::<String>("bodies_filename").ok_or("missing bodies filename")?;
    let bodies = load_bodies(Path::new(bodies_filename), silent_mode)?;
    let t0 = matches.get_one::<f64>("t0").copied().unwrap_or(0.);
    let t1 = *matches.get_one::<f64>("t1").ok_or("missing final time")?;
    Ok(Run {
        bodies: bodies,
        t0: t0,
        t1: t1,
        grid: grid(matches, 1001),
        settings: settings(matches),
        output_path: output_path(matches),
        silent_mode: silent_mode,
    })
}

fn prepare_preset(matches: &ArgMatches) -> Result<Run, Box<dyn Error>> {
    let silent_mode = matches.get_flag("silent");
    let preset_name = matches.get_one::<String>("preset_name").ok_or("missing preset name")?;
    let preset = preset(preset_name).ok_or_else(|| format!("unknown preset '{}'", preset_name))?;
    if !silent_mode {
        println!("[INFO {} UTC] Preset '{}': {}", timestamp(), preset.name, preset.description);
    }
    Ok(Run {
        grid: grid(matches, preset.samples),
        bodies: preset.bodies,
        t0: 0.,
        t1: preset.t_end,
        settings: settings(matches),
        output_path: output_path(matches),
        silent_mode: silent_mode,
    })
}

fn simulate(run: Run) -> Result<(), Box<dyn Error>> {
    if !run.silent_mode {
        println!("[INFO {} UTC] Integrating {} bodies from t = {} to t = {} (rtol = {:e}, atol = {:e})",
                 timestamp(), run.bodies.len(), run.t0, run.t1, run.settings.relative_tolerance, run.settings.absolute_tolerance);
    }
    let trajectory = orbits::integrate_with(&run.bodies, run.t0, run.t1, run.grid, &run.settings)?;
    report(&run.bodies, &trajectory, run.silent_mode);
    orbits::output::store_trajectory(&run.output_path, &run.bodies, &trajectory)?;
    if !run.silent_mode {
        println!("[INFO {} UTC] {} samples written to '{}'", timestamp(), trajectory.len(), run.output_path.display());
    }
    Ok(())
}

fn report(bodies: &[Body], trajectory: &Trajectory, silent_mode: bool) {
    let (initial, last) = match (trajectory.initial(), trajectory.last()) {
        (Some(initial), Some(last)) => (initial, last),
        _ => return,
    };
    let masses: Vec<f64> = bodies.iter().map(|body| body.mass).collect();
    let initial_energy = compute_total_energy(&masses, &initial.state);
    let final_energy = compute_total_energy(&masses, &last.state);
    let energy_drift = if initial_energy != 0. { ((final_energy - initial_energy)/initial_energy).abs() } else { (final_energy - initial_energy).abs() };
    let initial_momentum = compute_total_momentum(&masses, &initial.state);
    let final_momentum = compute_total_momentum(&masses, &last.state);

    if !silent_mode {
        let stats = trajectory.stats();
        println!("[INFO {} UTC] {} accepted steps, {} rejected steps, {} force evaluations",
                 timestamp(), stats.n_accepted_steps, stats.n_rejected_steps, stats.n_evaluations);
        println!("[INFO {} UTC] Relative energy drift: {:e}, momentum change: ({:e}, {:e})",
                 timestamp(), energy_drift, final_momentum.0 - initial_momentum.0, final_momentum.1 - initial_momentum.1);
    }
    if energy_drift > ENERGY_DRIFT_WARNING {
        println!("[WARNING {} UTC] Relative energy drift {:e} exceeds {:e}, consider lowering the tolerances", timestamp(), energy_drift, ENERGY_DRIFT_WARNING);
    }
}
