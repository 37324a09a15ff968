//! Inner PI rate controller.
//!
//! Tracks a gradient setpoint produced by the outer temperature loop (see
//! [`crate::outer_p`]) and drives a continuous duty in `[u_min, u_max]`.
//! Anti-windup uses back-calculation: the integrator is pulled back by the
//! exact amount the output was clamped, scaled by `Ts/Taw`, which cancels
//! windup growth precisely when saturated rather than merely clamping the
//! integrator's magnitude.

use crate::fixed_point::Q16;

pub struct InnerPi {
    kc: Q16,
    ts_over_ti: Q16,
    ts_over_taw: Q16,
    u_min: Q16,
    u_max: Q16,
    integrator: Q16,
    setpoint: Q16,
}

impl InnerPi {
    pub fn new(kc: Q16, ts_over_ti: Q16, ts_over_taw: Q16, u_min: Q16, u_max: Q16) -> Self {
        Self {
            kc,
            ts_over_ti,
            ts_over_taw,
            u_min,
            u_max,
            integrator: Q16::ZERO,
            setpoint: Q16::ZERO,
        }
    }

    pub fn set_setpoint(&mut self, g_sp: Q16) {
        self.setpoint = g_sp;
    }

    /// Zeros the integrator and setpoint (used on program start/stop).
    pub fn reset(&mut self) {
        self.integrator = Q16::ZERO;
        self.setpoint = Q16::ZERO;
    }

    /// Decays the integrator toward zero. Called while the heater cannot
    /// influence the plant (passive cooling) so the integrator doesn't wind
    /// up against a rate it has no way to track.
    pub fn freeze_integrator(&mut self) {
        self.integrator = Q16::ZERO;
    }

    /// Runs one PI step against the filtered gradient and returns the
    /// saturated duty.
    pub fn run(&mut self, g_f: Q16) -> Q16 {
        let e = self.setpoint - g_f;
        let u_unsat = self.kc * (e + self.integrator);
        let u = u_unsat.clamp(self.u_min, self.u_max);

        self.integrator = self.integrator + self.ts_over_ti * e + self.ts_over_taw * (u - u_unsat);

        u
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> InnerPi {
        InnerPi::new(
            Q16::from_float(1.0),
            Q16::from_float(1.0 / 60.0),
            Q16::from_float(1.0 / 60.0),
            Q16::ZERO,
            Q16::ONE,
        )
    }

    #[test]
    fn output_always_within_bounds() {
        let mut pi = controller();
        pi.set_setpoint(Q16::from_float(10.0));
        for i in 0..200 {
            let g_f = Q16::from_float((i as f32 * 0.1) - 5.0);
            let u = pi.run(g_f);
            assert!(u >= Q16::ZERO && u <= Q16::ONE);
        }
    }

    #[test]
    fn reset_zeros_state() {
        let mut pi = controller();
        pi.set_setpoint(Q16::from_float(5.0));
        pi.run(Q16::ZERO);
        pi.reset();
        // with integrator and setpoint zeroed, error is zero -> output zero
        let u = pi.run(Q16::ZERO);
        assert_eq!(u, Q16::ZERO);
    }

    #[test]
    fn saturated_windup_is_bounded_by_back_calculation() {
        let mut pi = controller();
        pi.set_setpoint(Q16::from_float(1000.0)); // deliberately unreachable
        let mut last = Q16::ZERO;
        for _ in 0..50 {
            last = pi.run(Q16::ZERO);
        }
        // output must stay pinned at u_max, not run away
        assert_eq!(last, Q16::ONE);
    }
}
