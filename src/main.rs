// src/main.rs - plan a trajectory from a parameter file and export
// samples for gnuplot

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use trajplan::config::PlanConfig;
use trajplan::profile::{AccelPlanner, JerkPlanner, MotionState};
use trajplan::plot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlannerKind {
    /// Trapezoidal velocity profile (acceleration-limited)
    Accel,
    /// S-curve profile (jerk-limited)
    Jerk,
}

#[derive(Parser, Debug)]
#[command(name = "trajplan", version, about = "Minimum-time two-point trajectory planner")]
struct Args {
    /// TOML parameter file (p0, pe, amax, vmax, ...)
    config: PathBuf,

    /// Which planner to run
    #[arg(long, value_enum, default_value_t = PlannerKind::Accel)]
    planner: PlannerKind,

    /// Directory for the data file and gnuplot script
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match PlanConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to load '{}': {e}", args.config.display());
            return ExitCode::from(2);
        }
    };

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &PlanConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (te, samples, include_jerk) = match args.planner {
        PlannerKind::Accel => {
            let mut planner = AccelPlanner::new();
            planner.init(
                config.p0,
                config.pe,
                config.amax,
                config.vmax,
                config.t0,
                config.v0,
                config.ve,
                config.dmax,
            )?;
            let te = planner.calc_trajectory()?;
            if let Some(trajectory) = planner.trajectory() {
                tracing::info!("case {:?}, te = {:.6} s", trajectory.case(), te);
            }
            (te, sample_range(config, te, |t| planner.sample(t))?, false)
        }
        PlannerKind::Jerk => {
            let jmax = config.jmax.ok_or("jerk planner requires jmax in the parameter file")?;
            let mut planner = JerkPlanner::new();
            planner.init(
                config.p0,
                config.pe,
                config.amax,
                config.vmax,
                jmax,
                config.t0,
                config.v0,
                config.ve,
            )?;
            let te = planner.calc_trajectory()?;
            if let Some(trajectory) = planner.trajectory() {
                tracing::info!("case {:?}, te = {:.6} s", trajectory.case(), te);
            }
            (te, sample_range(config, te, |t| planner.sample(t))?, true)
        }
    };

    let data_path = args.output_dir.join("data.txt");
    let script_path = args.output_dir.join("script.gnu");
    plot::write_data_file(&data_path, &samples, include_jerk)?;
    plot::write_gnuplot_script(&script_path, &data_path, "graph.png", include_jerk)?;
    tracing::info!(
        "wrote {} samples over {:.6} s to {}",
        samples.len(),
        te,
        data_path.display()
    );
    tracing::info!("render with: gnuplot {}", script_path.display());
    Ok(())
}

/// Sample `[t0, t0 + te]` at the configured step, endpoint included.
fn sample_range<F>(
    config: &PlanConfig,
    te: f64,
    sample: F,
) -> Result<Vec<MotionState>, trajplan::ProfileError>
where
    F: Fn(f64) -> Result<MotionState, trajplan::ProfileError>,
{
    let mut samples = Vec::new();
    let mut t = config.t0;
    while t < config.t0 + te {
        samples.push(sample(t)?);
        t += config.dt;
    }
    samples.push(sample(config.t0 + te)?);
    Ok(samples)
}
