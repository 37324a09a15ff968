//! Error types shared across the controller core.
//!
//! `core::fmt::Display` is implemented by hand rather than derived with
//! `thiserror`, since `thiserror`'s derive needs `std` and this crate must
//! build `no_std`.

use core::fmt;

/// A specific thermocouple fault reported by the sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    OpenCircuit,
    ShortToGround,
    ShortToVcc,
    /// The fault aggregate bit was set but no specific subcode was.
    Unknown,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FaultKind::OpenCircuit => "open circuit",
            FaultKind::ShortToGround => "short to ground",
            FaultKind::ShortToVcc => "short to vcc",
            FaultKind::Unknown => "unknown sensor fault",
        };
        f.write_str(s)
    }
}

/// Errors surfaced by the controller core's public entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KilnError {
    /// The sensor reported a specific fault condition.
    SensorFault(FaultKind),
    /// The sensor did not respond within the SPI read's time budget.
    SensorTimeout,
    /// A persisted record failed its magic/CRC/range check.
    PersistenceInvalid,
    /// A field was outside its documented range.
    RangeCheck,
    /// `program_start` was called with a program that has no steps.
    ProgramEmpty,
    /// A foreground call's precondition was not met (e.g. start with no program attached).
    PreconditionFailed,
}

impl fmt::Display for KilnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KilnError::SensorFault(kind) => write!(f, "sensor fault: {kind}"),
            KilnError::SensorTimeout => f.write_str("sensor read timed out"),
            KilnError::PersistenceInvalid => f.write_str("persisted record failed validation"),
            KilnError::RangeCheck => f.write_str("value outside documented range"),
            KilnError::ProgramEmpty => f.write_str("program has no steps"),
            KilnError::PreconditionFailed => f.write_str("precondition not met"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KilnError {}

pub type Result<T> = core::result::Result<T, KilnError>;
