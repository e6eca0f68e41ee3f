//! Terminal front end for the Game of Life simulator.

mod cli;
mod render;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use life_world::Simulation;
use std::io;
use std::process::ExitCode;
use tokio::signal;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(e) = telemetry::init_telemetry() {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Unable to run simulation: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> Result<()> {
    let (config, clear) = args.into_run_config()?;

    info!(
        width = config.grid.width,
        height = config.grid.height,
        edges = ?config.grid.edge_policy,
        delay_ms = config.delay_ms,
        "Starting Game of Life"
    );

    let mut simulation =
        Simulation::from_config(&config).context("Unable to generate simulation")?;

    tokio::select! {
        result = run_loop(&mut simulation, &config, clear) => result?,
        _ = shutdown_signal() => {}
    }

    info!(
        event = "run_summary",
        generations = simulation.generation(),
        final_population = simulation.population(),
        "Simulation finished"
    );
    Ok(())
}

async fn run_loop(
    simulation: &mut Simulation,
    config: &life_core::RunConfig,
    clear: bool,
) -> Result<()> {
    let mut ticker = interval(Duration::from_millis(config.delay_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut extinct = simulation.population() == 0;
    let mut still = false;

    loop {
        ticker.tick().await;

        render::draw(
            io::stdout().lock(),
            simulation.grid(),
            simulation.generation(),
            simulation.population(),
            &config.format,
            clear,
        )
        .context("Failed to draw frame")?;

        if config
            .max_generations
            .is_some_and(|limit| simulation.generation() >= limit)
        {
            info!("Generation limit of {} reached", simulation.generation());
            return Ok(());
        }

        let report = simulation.step();

        if report.population == 0 && !extinct {
            info!(generation = report.generation, "Population went extinct");
        }
        extinct = report.population == 0;

        if !report.changed && !still {
            info!(generation = report.generation, "Grid became static");
        }
        still = !report.changed;

        if report.generation % 100 == 0 {
            crate::record_gauge!("population", report.population, generation => report.generation);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
