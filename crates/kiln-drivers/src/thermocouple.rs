//! MAX31855-style K-type thermocouple SPI driver.
//!
//! Decodes the 32-bit, MSB-first wire frame by explicit shifts rather than a
//! packed bitfield, since bitfield layout is not portable across compilers.
//! The thermocouple sign is derived from the full 14-bit combined field
//! (sign + 11-bit magnitude + 2-bit quarter-degree fraction) via two's
//! complement sign extension, not by negating the 11-bit magnitude alone —
//! the two disagree for certain negative readings.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use kiln_core::error::{FaultKind, KilnError, Result};
use kiln_core::sensor::{TemperatureSource, ThermocoupleSample};

/// Sign-extends the low `bits` bits of `value` (two's complement).
fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

fn decode_frame(raw: u32) -> ThermocoupleSample {
    let thermo_raw14 = (raw >> 18) & 0x3FFF;
    let thermo_quarter_degrees = sign_extend(thermo_raw14, 14);
    let thermo_mdeg = thermo_quarter_degrees * 250;

    let cj_raw12 = (raw >> 4) & 0x0FFF;
    let cj_sixteenths = sign_extend(cj_raw12, 12);
    let cold_junction_mdeg = (cj_sixteenths * 1000) / 16;

    let fault_bit = (raw >> 16) & 0x1 != 0;
    let oc_fault = raw & 0x1 != 0;
    let scg_fault = (raw >> 1) & 0x1 != 0;
    let scv_fault = (raw >> 2) & 0x1 != 0;

    let fault = if !fault_bit {
        None
    } else if oc_fault {
        Some(FaultKind::OpenCircuit)
    } else if scg_fault {
        Some(FaultKind::ShortToGround)
    } else if scv_fault {
        Some(FaultKind::ShortToVcc)
    } else {
        Some(FaultKind::Unknown)
    };

    ThermocoupleSample { thermo_mdeg, cold_junction_mdeg, fault }
}

/// Blocking MAX31855-style thermocouple reader.
///
/// `CS` is driven manually (asserted low around the 4-byte read) rather than
/// relying on the SPI peripheral's hardware chip-select, matching the
/// original driver's bit-banged NSS handling.
pub struct Thermocouple<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS, E> Thermocouple<SPI, CS>
where
    SPI: SpiBus<u8, Error = E>,
    CS: OutputPin,
{
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    fn read_frame(&mut self) -> core::result::Result<u32, ()> {
        let mut buf = [0u8; 4];
        self.cs.set_low().map_err(|_| ())?;
        let result = self.spi.read(&mut buf);
        self.cs.set_high().map_err(|_| ())?;
        result.map_err(|_| ())?;
        Ok(u32::from_be_bytes(buf))
    }
}

impl<SPI, CS, E> TemperatureSource for Thermocouple<SPI, CS>
where
    SPI: SpiBus<u8, Error = E>,
    CS: OutputPin,
{
    fn read(&mut self) -> Result<ThermocoupleSample> {
        let raw = self.read_frame().map_err(|_| KilnError::SensorTimeout)?;
        Ok(decode_frame(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_positive_reading_with_no_fault() {
        // 100.00 C thermocouple -> 400 quarter-degrees == 0x190 << 2
        let thermo_field: u32 = 400 << 18;
        let cj_field: u32 = (20 * 16) << 4; // 20.0 C cold junction
        let raw = thermo_field | cj_field;
        let sample = decode_frame(raw);
        assert_eq!(sample.thermo_mdeg, 100_000);
        assert_eq!(sample.cold_junction_mdeg, 20_000);
        assert_eq!(sample.fault, None);
    }

    #[test]
    fn decodes_negative_reading_via_full_14_bit_twos_complement() {
        // -10.00 C -> -40 quarter-degrees, 14-bit two's complement of -40
        let signed14 = (-40i32) & 0x3FFF;
        let raw = (signed14 as u32) << 18;
        let sample = decode_frame(raw);
        assert_eq!(sample.thermo_mdeg, -10_000);
    }

    #[test]
    fn decodes_open_circuit_fault() {
        let raw: u32 = (1 << 16) | 0x1;
        let sample = decode_frame(raw);
        assert_eq!(sample.fault, Some(FaultKind::OpenCircuit));
    }

    #[test]
    fn decodes_short_to_ground_fault() {
        let raw: u32 = (1 << 16) | (1 << 1);
        let sample = decode_frame(raw);
        assert_eq!(sample.fault, Some(FaultKind::ShortToGround));
    }

    #[test]
    fn decodes_short_to_vcc_fault() {
        let raw: u32 = (1 << 16) | (1 << 2);
        let sample = decode_frame(raw);
        assert_eq!(sample.fault, Some(FaultKind::ShortToVcc));
    }

    #[test]
    fn decodes_unknown_fault_when_aggregate_set_without_subcode() {
        let raw: u32 = 1 << 16;
        let sample = decode_frame(raw);
        assert_eq!(sample.fault, Some(FaultKind::Unknown));
    }
}
