//! Outer temperature controller.
//!
//! A heating-only proportional controller: converts temperature error into a
//! gradient setpoint for [`crate::inner_pi::InnerPi`], saturated by the
//! active step's maximum allowed rate. Cooling steps command zero gradient
//! (the plant is left to cool passively; see [`crate::cooling_brake`] for the
//! safety net that re-applies heat if it cools too fast).

use crate::fixed_point::Q16;

pub struct OuterP {
    kp_t: Q16,
    t_band_mdeg: i32,
    t_set_mdeg: i32,
    g_max: Q16,
    is_cooling: bool,
    enabled: bool,
}

impl OuterP {
    pub fn new(kp_t: Q16, t_band_mdeg: i32) -> Self {
        Self {
            kp_t,
            t_band_mdeg,
            t_set_mdeg: 0,
            g_max: Q16::ZERO,
            is_cooling: false,
            enabled: false,
        }
    }

    pub fn set_target(&mut self, t_set_mdeg: i32, g_max: Q16, is_cooling: bool) {
        self.t_set_mdeg = t_set_mdeg;
        self.g_max = g_max;
        self.is_cooling = is_cooling;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_cooling(&self) -> bool {
        self.is_cooling
    }

    pub fn reset(&mut self) {
        self.t_set_mdeg = 0;
        self.is_cooling = false;
        self.enabled = false;
    }

    /// Returns the gradient setpoint (°C/s, `Q16`) for the current measurement.
    pub fn update(&self, t_meas_mdeg: i32) -> Q16 {
        if !self.enabled || self.is_cooling {
            return Q16::ZERO;
        }

        let e_t_mdeg = self.t_set_mdeg - t_meas_mdeg;

        if e_t_mdeg <= 0 {
            return Q16::ZERO;
        }
        if e_t_mdeg < self.t_band_mdeg {
            return Q16::ZERO;
        }

        let g_sp = (self.kp_t * Q16::from_int(e_t_mdeg)) / Q16::from_int(1000);
        if g_sp > self.g_max {
            self.g_max
        } else {
            g_sp
        }
    }

    /// Step-completion predicate used by the sequencer.
    pub fn at_target(&self, t_meas_mdeg: i32) -> bool {
        let e_t_mdeg = self.t_set_mdeg - t_meas_mdeg;
        if self.is_cooling {
            e_t_mdeg >= 0
        } else {
            e_t_mdeg < self.t_band_mdeg
        }
    }
}
