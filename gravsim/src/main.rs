use gravsim::{ScenarioConfig, Scenario, SpaceSnapshot};
use gravsim::{bench_step, bench_frame_curve};

use clap::Parser;
use anyhow::{Context, Result};
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Headless driver for the 2D gravity sandbox")]
struct Args {
    /// Scenario file, relative to the crate's `scenarios/` directory unless absolute
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Let the view drift with the bodies
    #[arg(long)]
    follow: bool,

    /// Restore bodies and viewport from a snapshot instead of the scenario
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write a snapshot after the run
    #[arg(long)]
    save: Option<PathBuf>,

    /// Run the step benchmark and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.is_absolute() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };
    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_step();
        bench_frame_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg)?;
    scenario.engine.follow_objects |= args.follow;

    if let Some(path) = &args.load {
        let snapshot = SpaceSnapshot::load(path)
            .with_context(|| format!("failed to load snapshot {}", path.display()))?;
        scenario.restore(&snapshot);
    }

    let advanced = scenario.run_frames(args.frames);
    info!("simulated {} frames, t = {:.3}", advanced, scenario.space.t);

    for (id, body) in scenario.space.iter() {
        info!(
            "body {}: m = {:.3}, x = ({:.3}, {:.3}), v = ({:.4}, {:.4})",
            id,
            body.mass(),
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
        );
    }
    let p = scenario.space.total_momentum();
    info!("total momentum = ({:.6}, {:.6})", p.x, p.y);

    if let Some(path) = &args.save {
        scenario.space.snapshot().save(path)
            .with_context(|| format!("failed to save snapshot {}", path.display()))?;
    }

    Ok(())
}
