//! Embassy entry point.
//!
//! Initializes the board, builds the controller core from whatever settings
//! are persisted in flash (or their compiled defaults), and spawns the 1 Hz
//! tick task. The foreground UI task (external collaborator, not part of
//! this crate) posts commands through `COMMAND_MAILBOX` and reads
//! `TELEMETRY_CELL`.

use crate::boards::stm32f407::pins::BoardPins;
use crate::command::{CommandMailbox, TelemetryCell};
use crate::flash::FlashRegion;
use crate::tick_task;
use crate::watchdog::Watchdog;
use embassy_executor::Spawner;
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::Spi;
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_stm32::Config;
use kiln_core::persistence;
use kiln_core::tick::KilnController;
use kiln_drivers::coils::Coils;
use kiln_drivers::door::Door;
use kiln_drivers::thermocouple::Thermocouple;

static COMMAND_MAILBOX: CommandMailbox = CommandMailbox::new();
static TELEMETRY_CELL: TelemetryCell = TelemetryCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Initializing kiln firmware...");

    let config = Config::default();
    let p = embassy_stm32::init(config);
    let pins = BoardPins::new(p);

    let mut flash = Flash::new_blocking(pins.flash);
    let settings = persistence::load_settings(&FlashRegion::settings(&mut flash));
    let controller = KilnController::new(settings);

    let spi = Spi::new_blocking(pins.spi2, Default::default());
    let cs = Output::new(pins.thermo_cs, Level::High, Speed::Low);
    let thermocouple = Thermocouple::new(spi, cs);

    let coil_a = Output::new(pins.coil_a, Level::Low, Speed::Low);
    let coil_b = Output::new(pins.coil_b, Level::Low, Speed::Low);
    let coil_c = Output::new(pins.coil_c, Level::Low, Speed::Low);
    let coils = Coils::new(coil_a, coil_b, coil_c);

    let door_pin = embassy_stm32::gpio::Input::new(pins.door, embassy_stm32::gpio::Pull::Down);
    let door = Door::new(door_pin, true);

    let watchdog = Watchdog::new(IndependentWatchdog::new(Default::default(), 2_000_000));

    spawner
        .spawn(tick_task_entry(controller, thermocouple, coils, door, watchdog))
        .unwrap();

    defmt::info!("Initialization complete.");
}

#[embassy_executor::task]
async fn tick_task_entry(
    controller: KilnController,
    sensor: Thermocouple<
        embassy_stm32::spi::Spi<'static, embassy_stm32::mode::Blocking>,
        Output<'static>,
    >,
    coils: Coils<Output<'static>, Output<'static>, Output<'static>>,
    door: Door<embassy_stm32::gpio::Input<'static>>,
    watchdog: Watchdog<'static>,
) {
    tick_task::run(controller, sensor, coils, door, &COMMAND_MAILBOX, &TELEMETRY_CELL, watchdog).await;
}
