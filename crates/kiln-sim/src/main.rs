//! CLI for running a single firing-scenario simulation and printing its
//! trace, for manual tuning/inspection outside the test suite.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use kiln_core::persistence::Settings;
use kiln_core::program::{Program, Step};
use kiln_sim::SimHarness;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    Idle,
    SingleHeat,
    HeatThenCool,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(value_enum)]
    scenario: Scenario,

    #[arg(long, default_value_t = 3600)]
    ticks: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut harness = SimHarness::new(20.0, Settings::defaults());

    match args.scenario {
        Scenario::Idle => {}
        Scenario::SingleHeat => {
            harness.start_program(Program::from_steps(&[Step::new(150, false, 100)]));
        }
        Scenario::HeatThenCool => {
            harness.start_program(Program::from_steps(&[
                Step::new(300, false, 200),
                Step::new(100, true, 80),
            ]));
        }
    }

    for entry in harness.run_ticks(args.ticks) {
        if entry.telemetry.window_started {
            tracing::info!(
                tick_ms = entry.tick_ms,
                temp_c = entry.plant_temperature_c,
                duty = entry.telemetry.duty.to_float(),
                mode = ?entry.telemetry.mode,
                step = entry.telemetry.step_index,
                "telemetry"
            );
        }
    }

    Ok(())
}
