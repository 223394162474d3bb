use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rewind2d::{BodyId, Renderer, SceneHost, ScenarioConfig, Session, SessionOptions, SystemClock, World};

#[derive(Parser, Debug)]
#[command(name = "rewind2d", version, about = "Run a circle/box scenario headless and report the timeline")]
struct Args {
    /// Scenario file (.yaml/.yml or .json). Defaults to the built-in walled box.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of scheduler ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: usize,

    /// Authoring mode (smaller precompute budget)
    #[arg(long, action = ArgAction::SetTrue)]
    creating: bool,

    /// Sleep one frame period between ticks
    #[arg(long, action = ArgAction::SetTrue)]
    realtime: bool,

    /// Print a report every N ticks
    #[arg(long, default_value_t = 60)]
    report_every: usize,

    /// Write the seed world as JSON to this path
    #[arg(long)]
    export: Option<PathBuf>,
}

/// Hands out the scenario's seed world on every restart.
struct ScenarioHost {
    seed: World,
}

impl SceneHost for ScenarioHost {
    fn initial_state(&mut self) -> World {
        self.seed.clone()
    }

    fn on_initial_state_edited(&mut self, world: &World) {
        self.seed = world.clone();
    }
}

/// Prints body positions instead of drawing them.
struct TextRenderer {
    label: String,
}

impl Renderer for TextRenderer {
    fn draw(&mut self, world: &World, _selected: &[BodyId]) {
        for b in world.bodies().iter().filter(|b| !b.mass.is_immovable()) {
            println!(
                "  [{}] body {:>3} loc=({:8.2},{:8.2}) vel=({:6.2},{:6.2})",
                self.label, b.id.0, b.loc.x, b.loc.y, b.vel.x, b.vel.y
            );
        }
    }
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    match &args.scenario {
        Some(path) => ScenarioConfig::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(ScenarioConfig::walled_box(800.0, 600.0)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = load_scenario(&args)?;
    let seed = scenario.build_world().context("invalid scenario")?;
    let fps = scenario.timeline.fps.max(1);

    if let Some(out) = &args.export {
        let json = seed.export().to_json_pretty()?;
        std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        println!("wrote seed world to {}", out.display());
    }

    let mut session = Session::new(
        ScenarioHost { seed },
        SystemClock::new(),
        SessionOptions {
            creating: args.creating,
            timeline: scenario.timeline.clone(),
            ..Default::default()
        },
    );
    println!(
        "precomputed {} frames ({} bodies)",
        session.timeline().len(),
        session.current().len()
    );

    let period = Duration::from_secs_f64(1.0 / fps as f64);
    let every = args.report_every.max(1);
    for tick in 1..=args.ticks {
        let report = session.tick();
        if tick % every == 0 {
            println!(
                "t={} cursor={} buffered={} catch_up={} sync={}",
                session.elapsed_label(),
                report.cursor,
                report.len,
                report.catch_up,
                report.synchronous
            );
            session.draw(&mut TextRenderer {
                label: session.elapsed_label(),
            });
        }
        if args.realtime {
            std::thread::sleep(period);
        }
    }
    Ok(())
}
