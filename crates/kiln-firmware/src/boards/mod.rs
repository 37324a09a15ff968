//! Board-specific peripheral wiring. One module per supported target.

pub mod stm32f407;
