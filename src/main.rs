mod config;     // layered TOML + environment settings
mod driver;     // sense-then-drive simulation loop
mod error;
mod progress;   // per-step observers
mod report;     // trajectory rows, summary and CSV output
mod world;      // world image synthesis, loading and path overlay

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

use driver::{Outcome, Simulation};
use error::SimulationError;
use progress::TracingProgress;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Seeker started. Loading configuration...");
    let cfg = config::load_config().context("Failed to load configuration")?;
    let sim = Simulation::new(&cfg).context("Invalid configuration")?;

    let start = (cfg.robot.start_x, cfg.robot.start_y);
    let world = world::load_or_synthesize(&cfg.world, start)?;

    std::fs::create_dir_all(&cfg.output.dir)
        .with_context(|| format!("Could not create output directory {}", cfg.output.dir.display()))?;

    if cfg.output.write_mask {
        let path = cfg.output.dir.join("detection_mask.png");
        sim.locator().mask(&world).save(&path).with_context(|| format!("Could not save {}", path.display()))?;
        info!(path = %path.display(), "Detection mask saved");
    }

    let mut progress = TracingProgress::new(cfg.sim.progress_interval);
    let report = match sim.run(&world, &mut progress) {
        Ok(report) => report,
        Err(SimulationError::GoalNotFound) => {
            error!("Could not find the goal. Cannot run simulation.");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e).context("Simulation failed"),
    };

    if let Some(d) = &report.detection {
        info!(goal = %report.goal, radius = d.radius, area = d.area, "Goal resolved from detection");
    }

    match report.outcome {
        Outcome::Reached { steps, final_distance } => info!(
            steps,
            final_distance,
            stop_distance = sim.controller().config().stop_distance,
            "Goal reached"
        ),
        Outcome::Exhausted { steps, final_distance } => {
            info!(steps, final_distance, "Stopped after {} steps. Final distance: {:.1}", steps, final_distance)
        }
    }

    let rows = report::trajectory(&report.history, report.goal);
    if let Some(summary) = report::summarize(&rows) {
        info!(
            path_length = summary.path_length,
            min_distance = summary.min_distance,
            final_distance = summary.final_distance,
            poses = rows.len(),
            "Trajectory summary"
        );
    }

    if cfg.output.write_trajectory {
        let path = cfg.output.dir.join("trajectory.csv");
        report::write_csv(&path, &rows)?;
        info!(path = %path.display(), "Trajectory saved");
    }

    if cfg.output.write_overlay {
        let path = cfg.output.dir.join("final_navigation_result.png");
        world::draw_path(&world, &report.history, report.goal)
            .save(&path)
            .with_context(|| format!("Could not save {}", path.display()))?;
        info!(path = %path.display(), "Navigation overlay saved");
    }

    info!(
        steps = report.outcome.steps(),
        final_distance = report.outcome.final_distance(),
        "Simulation complete"
    );
    Ok(ExitCode::SUCCESS)
}
