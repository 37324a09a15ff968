#![no_std]

//! Hardware drivers for the kiln firing controller: the MAX31855-style
//! thermocouple SPI frame decode, the three-coil SSR output driver, and the
//! door sensor input. Each implements the small traits `kiln-core` depends
//! on so the controller core itself never touches `embedded-hal`.

pub mod coils;
pub mod door;
pub mod thermocouple;
