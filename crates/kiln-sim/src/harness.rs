//! Drives a [`KilnController`] against a [`Plant`] one tick at a time,
//! recording a trace of telemetry the way the reference workspace's `sim`
//! crate records a trace of MCU protocol exchanges.

use crate::fakes::{FakeCoils, FakeDoor, FakeSensor};
use crate::plant::Plant;
use kiln_core::persistence::Settings;
use kiln_core::program::Program;
use kiln_core::tick::KilnController;
use kiln_core::telemetry::Telemetry;

pub struct TraceEntry {
    pub tick_ms: u32,
    pub telemetry: Telemetry,
    pub plant_temperature_c: f64,
}

pub struct SimHarness {
    pub controller: KilnController,
    pub plant: Plant,
    pub sensor: FakeSensor,
    pub coils: FakeCoils,
    pub door: FakeDoor,
    now_ms: u32,
}

impl SimHarness {
    pub fn new(ambient_c: f64, settings: Settings) -> Self {
        Self {
            controller: KilnController::new(settings),
            plant: Plant::new(ambient_c),
            sensor: FakeSensor::new((ambient_c * 1000.0) as i32),
            coils: FakeCoils::default(),
            door: FakeDoor::default(),
            now_ms: 0,
        }
    }

    pub fn start_program(&mut self, program: Program) {
        self.controller.program_start(program).expect("program should start");
    }

    /// Advances one 1 Hz tick: reads the plant's current temperature into
    /// the fake sensor, runs the controller, then feeds the resulting SSR
    /// state back into the plant.
    pub fn tick(&mut self) -> TraceEntry {
        if self.sensor.inject_fault.is_none() {
            self.sensor.mdeg = self.plant.mdeg();
        }

        let telemetry = self.controller.tick(self.now_ms, &mut self.sensor, &mut self.coils, &mut self.door);

        let duty = if self.coils.on { 1.0 } else { 0.0 };
        self.plant.step(duty, 1.0);

        self.now_ms += 1000;

        TraceEntry { tick_ms: self.now_ms, telemetry, plant_temperature_c: self.plant.temperature_c }
    }

    pub fn run_ticks(&mut self, count: u32) -> Vec<TraceEntry> {
        (0..count).map(|_| self.tick()).collect()
    }
}
