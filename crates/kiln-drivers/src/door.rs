//! Kiln door sensor input.
//!
//! Level-sensitive; debouncing is explicitly out of scope and left to the
//! UI/input layer, matching the original controller.

use embedded_hal::digital::InputPin;
use kiln_core::sensor::DoorSensor as DoorSensorTrait;

pub struct Door<P> {
    pin: P,
    /// `true` if the pin reads high when the door is open.
    active_high: bool,
}

impl<P: InputPin> Door<P> {
    pub fn new(pin: P, active_high: bool) -> Self {
        Self { pin, active_high }
    }
}

impl<P: InputPin> DoorSensorTrait for Door<P> {
    fn is_open(&mut self) -> bool {
        let high = self.pin.is_high().unwrap_or(false);
        high == self.active_high
    }
}
