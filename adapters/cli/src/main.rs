#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays turret scenarios against the overlay systems.

mod scenario;
mod session;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use better_turrets_config::{load_or_default, DEFAULT_CONFIG_FILE};
use better_turrets_core::{Command, EntityId};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    scenario::{Scenario, Step},
    session::Session,
};

/// Command-line arguments accepted by the replay tool.
#[derive(Debug, Parser)]
#[command(name = "better-turrets", about = "Replays turret scenarios")]
struct Args {
    /// Scenario file describing entities and steps.
    #[arg(long)]
    scenario: PathBuf,
    /// Settings file; defaults to `config.toml` in the working directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for fallback name draws, overriding the scenario's seed.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the replay command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let tuning = load_or_default(&config_path);

    let contents = fs::read_to_string(&args.scenario).with_context(|| {
        format!(
            "failed to read scenario file at {}",
            args.scenario.display()
        )
    })?;
    let scenario = Scenario::parse(&contents)?;
    let seed = args.seed.or(scenario.seed).unwrap_or(0);

    info!(
        scenario = %args.scenario.display(),
        seed,
        steps = scenario.steps.len(),
        "replaying scenario"
    );

    let mut session = Session::new(tuning, seed);
    for command in scenario.setup_commands() {
        session.apply(command);
    }

    for step in &scenario.steps {
        for line in run_step(&mut session, step) {
            println!("{line}");
        }
    }

    Ok(())
}

fn run_step(session: &mut Session, step: &Step) -> Vec<String> {
    match *step {
        Step::Hit { .. } => step
            .damage_event()
            .map(|event| {
                format!(
                    "hit {} -> {}: {} => {}",
                    event.attacker.get(),
                    event.victim.get(),
                    event.raw_amount,
                    session.hit(&event)
                )
            })
            .into_iter()
            .collect(),
        Step::Status { controller } => {
            let rows = session.status(EntityId::new(controller));
            let mut lines = vec![format!("status {controller}:")];
            if rows.is_empty() {
                lines.push("  (no turrets)".to_owned());
            }
            lines.extend(rows.iter().map(|row| format!("  {row}")));
            lines
        }
        Step::Remove { id } => {
            session.apply(Command::RemoveEntity {
                id: EntityId::new(id),
            });
            vec![format!("removed {id}")]
        }
        Step::Reload { controller, turret } => {
            match session.reload(EntityId::new(controller), EntityId::new(turret)) {
                Some(ammo) => vec![format!("reload {turret}: {ammo}")],
                None => vec![format!("reload {turret}: refused")],
            }
        }
    }
}
