//! Read-only telemetry snapshot.
//!
//! Published by the tick driver after every SSR window start. Nothing
//! outside the tick driver reaches into controller internals directly; a UI
//! or host harness observes the controller only through this struct.

use crate::fixed_point::Q16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Idle,
    Heat,
    CoolBrake,
    CoolPassive,
    SafetyHold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub measured_mdeg: i32,
    pub filtered_gradient_degph: Q16,
    pub duty: Q16,
    pub ssr_on: bool,
    pub mode: ControlMode,
    pub step_index: u8,
    /// Whether this tick started a new SSR window; callers that only want
    /// to publish telemetry once per window (rather than once per tick)
    /// gate on this.
    pub window_started: bool,
}
