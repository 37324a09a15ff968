//! The 1 Hz controller tick task.
//!
//! Mirrors the reference firmware's `heater_task`: an `embassy_time::Ticker`
//! drives one control cycle per period, checking the command mailbox first
//! and feeding the independent watchdog last.

use crate::command::{CommandMailbox, ControllerCommand, TelemetryCell};
use crate::watchdog::Watchdog;
use embassy_time::{Duration, Instant, Ticker};
use kiln_core::sensor::{CoilOutput, DoorSensor, TemperatureSource};
use kiln_core::tick::KilnController;

#[allow(clippy::too_many_arguments)]
pub async fn run<S, C, D>(
    mut controller: KilnController,
    mut sensor: S,
    mut coils: C,
    mut door: D,
    mailbox: &'static CommandMailbox,
    telemetry_cell: &'static TelemetryCell,
    mut watchdog: Watchdog<'static>,
) where
    S: TemperatureSource,
    C: CoilOutput,
    D: DoorSensor,
{
    let mut ticker = Ticker::every(Duration::from_secs(1));
    let start = Instant::now();

    loop {
        if let Some(command) = mailbox.take().await {
            match command {
                ControllerCommand::ProgramStart(program) => {
                    let _ = controller.program_start(program);
                }
                ControllerCommand::ProgramStop => controller.program_stop(&mut coils),
                ControllerCommand::ApplySettings(settings) => {
                    let _ = controller.apply_settings(settings);
                }
            }
        }

        let now_ms = Instant::now().duration_since(start).as_millis() as u32;
        let telemetry = controller.tick(now_ms, &mut sensor, &mut coils, &mut door);
        if telemetry.window_started {
            telemetry_cell.publish(telemetry).await;
        }

        watchdog.feed();
        ticker.next().await;
    }
}
