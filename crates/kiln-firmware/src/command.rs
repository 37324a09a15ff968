//! Foreground-to-tick-task command mailbox.
//!
//! The UI/input layer calls `program_start`, `program_stop`, and
//! `apply_settings` from its own cooperative task; those calls must not tear
//! controller state mid-tick. Rather than locking the whole controller for
//! the UI's convenience, the foreground posts one command into a
//! single-slot mailbox and the tick task drains it at a fixed point each
//! cycle, guaranteeing the whole record is swapped atomically with respect
//! to the 1 Hz tick.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use kiln_core::persistence::Settings;
use kiln_core::program::Program;
use kiln_core::telemetry::Telemetry;

pub enum ControllerCommand {
    ProgramStart(Program),
    ProgramStop,
    ApplySettings(Settings),
}

pub struct CommandMailbox {
    slot: Mutex<CriticalSectionRawMutex, Option<ControllerCommand>>,
}

impl CommandMailbox {
    pub const fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    pub async fn post(&self, command: ControllerCommand) {
        *self.slot.lock().await = Some(command);
    }

    pub async fn take(&self) -> Option<ControllerCommand> {
        self.slot.lock().await.take()
    }
}

/// Single-writer telemetry cell the tick task publishes to and the UI
/// layer reads from; never written by anything but the tick task.
pub struct TelemetryCell {
    value: Mutex<CriticalSectionRawMutex, Option<Telemetry>>,
}

impl TelemetryCell {
    pub const fn new() -> Self {
        Self { value: Mutex::new(None) }
    }

    pub async fn publish(&self, telemetry: Telemetry) {
        *self.value.lock().await = Some(telemetry);
    }

    pub async fn latest(&self) -> Option<Telemetry> {
        *self.value.lock().await
    }
}
