#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::all)]

//! Cascaded gradient/temperature controller core for a ceramic kiln firing
//! controller.
//!
//! This crate is hardware-agnostic: it knows nothing about SPI, GPIO, or
//! flash peripherals directly. It depends on small traits ([`sensor`]) that
//! `kiln-drivers` implements against real hardware and `kiln-sim` implements
//! against a deterministic plant model for end-to-end tests.

pub mod cooling_brake;
pub mod error;
pub mod fixed_point;
pub mod gradient;
pub mod inner_pi;
pub mod outer_p;
pub mod persistence;
pub mod program;
pub mod sensor;
pub mod sequencer;
pub mod ssr;
pub mod telemetry;
pub mod tick;

pub use error::{FaultKind, KilnError, Result};
pub use fixed_point::Q16;
pub use tick::KilnController;
