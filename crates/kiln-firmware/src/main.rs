#![no_std]
#![no_main]
#![cfg_attr(feature = "embassy-rt", feature(type_alias_impl_trait))]

use defmt_rtt as _; // global logger
use panic_probe as _;

pub mod boards;
pub mod command;
pub mod flash;
pub mod tick_task;
pub mod watchdog;

#[cfg(feature = "embassy-rt")]
mod embassy_main;
#[cfg(feature = "embassy-rt")]
use embassy_main as _;
