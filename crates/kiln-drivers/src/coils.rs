//! Three-coil SSR output driver.
//!
//! All three coils are driven identically from a single logical SSR state;
//! writing different values to them would be a bug, so the type only
//! exposes `set(bool)` rather than per-coil control.

use embedded_hal::digital::OutputPin;
use kiln_core::sensor::CoilOutput as CoilOutputTrait;

pub struct Coils<P1, P2, P3> {
    coil_a: P1,
    coil_b: P2,
    coil_c: P3,
}

impl<P1, P2, P3> Coils<P1, P2, P3>
where
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
{
    pub fn new(coil_a: P1, coil_b: P2, coil_c: P3) -> Self {
        Self { coil_a, coil_b, coil_c }
    }
}

impl<P1, P2, P3> CoilOutputTrait for Coils<P1, P2, P3>
where
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
{
    fn set(&mut self, on: bool) {
        if on {
            let _ = self.coil_a.set_high();
            let _ = self.coil_b.set_high();
            let _ = self.coil_c.set_high();
        } else {
            let _ = self.coil_a.set_low();
            let _ = self.coil_b.set_low();
            let _ = self.coil_c.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock, State, Transaction};

    #[test]
    fn drives_all_three_coils_identically() {
        let exp_a = [Transaction::set(State::High), Transaction::set(State::Low)];
        let exp_b = exp_a.clone();
        let exp_c = exp_a.clone();
        let a = Mock::new(&exp_a);
        let b = Mock::new(&exp_b);
        let c = Mock::new(&exp_c);
        let mut coils = Coils::new(a, b, c);

        coils.set(true);
        coils.set(false);

        coils.coil_a.done();
        coils.coil_b.done();
        coils.coil_c.done();
    }
}
