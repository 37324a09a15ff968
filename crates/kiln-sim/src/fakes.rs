//! Fakes standing in for real hardware in host-side tests.

use kiln_core::error::{FaultKind, Result};
use kiln_core::persistence::FlashPage;
use kiln_core::sensor::{CoilOutput, DoorSensor, TemperatureSource, ThermocoupleSample};

/// Reads whatever temperature the test harness currently sets, optionally
/// injecting a fault instead of a real reading.
pub struct FakeSensor {
    pub mdeg: i32,
    pub cold_junction_mdeg: i32,
    pub inject_fault: Option<FaultKind>,
}

impl FakeSensor {
    pub fn new(initial_mdeg: i32) -> Self {
        Self { mdeg: initial_mdeg, cold_junction_mdeg: 20_000, inject_fault: None }
    }
}

impl TemperatureSource for FakeSensor {
    fn read(&mut self) -> Result<ThermocoupleSample> {
        Ok(ThermocoupleSample {
            thermo_mdeg: self.mdeg,
            cold_junction_mdeg: self.cold_junction_mdeg,
            fault: self.inject_fault,
        })
    }
}

/// Records the SSR state so the harness can feed it back into the plant.
#[derive(Default)]
pub struct FakeCoils {
    pub on: bool,
}

impl CoilOutput for FakeCoils {
    fn set(&mut self, on: bool) {
        self.on = on;
    }
}

/// Door sensor the test harness flips directly.
#[derive(Default)]
pub struct FakeDoor {
    pub open: bool,
}

impl DoorSensor for FakeDoor {
    fn is_open(&mut self) -> bool {
        self.open
    }
}

/// In-memory stand-in for a flash sector.
pub struct MemoryFlashPage {
    data: [u8; 1024],
}

impl MemoryFlashPage {
    pub fn erased() -> Self {
        Self { data: [0xFF; 1024] }
    }

    pub fn corrupt_byte(&mut self, offset: usize) {
        self.data[offset] ^= 0xFF;
    }
}

impl FlashPage for MemoryFlashPage {
    const SIZE: usize = 1024;

    fn read(&self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.data[..buf.len()]);
    }

    fn erase(&mut self) {
        self.data = [0xFF; 1024];
    }

    fn write(&mut self, data: &[u8]) {
        self.data[..data.len()].copy_from_slice(data);
    }
}
