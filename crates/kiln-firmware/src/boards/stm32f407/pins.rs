//! Board-specific pin assignments for the STM32F407 target.

use embassy_stm32::peripherals;
use embassy_stm32::Peripherals;

pub struct BoardPins {
    pub spi2: peripherals::SPI2,
    pub thermo_cs: peripherals::PB12,
    pub coil_a: peripherals::PA0,
    pub coil_b: peripherals::PA1,
    pub coil_c: peripherals::PA2,
    pub door: peripherals::PA3,
    pub flash: peripherals::FLASH,
}

impl BoardPins {
    pub fn new(p: Peripherals) -> Self {
        Self {
            spi2: p.SPI2,
            thermo_cs: p.PB12,
            coil_a: p.PA0,
            coil_b: p.PA1,
            coil_c: p.PA2,
            door: p.PA3,
            flash: p.FLASH,
        }
    }
}
