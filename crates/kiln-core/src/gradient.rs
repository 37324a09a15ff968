//! Discrete temperature-gradient estimator.
//!
//! Converts successive temperature samples into a filtered rate of change in
//! °C/s (as [`Q16`]). Must be driven exactly once per tick; skipping a tick
//! (e.g. on a sensor fault) is the caller's responsibility and will bias the
//! EMA's implicit time constant.

use crate::fixed_point::Q16;

/// EMA-filtered gradient estimator.
pub struct GradientEstimator {
    alpha: Q16,
    one_minus_alpha: Q16,
    ts_ms: i32,
    t_prev_mdeg: i32,
    g_f_prev: Q16,
    initialized: bool,
}

impl GradientEstimator {
    pub fn new(alpha: Q16, ts_ms: i32) -> Self {
        Self {
            alpha,
            one_minus_alpha: Q16::ONE - alpha,
            ts_ms,
            t_prev_mdeg: 0,
            g_f_prev: Q16::ZERO,
            initialized: false,
        }
    }

    /// Resets the filter to its just-constructed state (first call after
    /// reset returns 0 and only stores the temperature).
    pub fn reset(&mut self) {
        self.t_prev_mdeg = 0;
        self.g_f_prev = Q16::ZERO;
        self.initialized = false;
    }

    /// Feeds a new temperature sample (milli-degrees C) and returns the
    /// filtered gradient in °C/s as `Q16`.
    pub fn update(&mut self, t_current_mdeg: i32) -> Q16 {
        if !self.initialized {
            self.t_prev_mdeg = t_current_mdeg;
            self.initialized = true;
            return Q16::ZERO;
        }

        let dt_mdeg = t_current_mdeg - self.t_prev_mdeg;
        // g_hat [deg/s] = dT_mdeg [mdeg] / Ts_ms [ms]; in Q16: (dT_mdeg << 16) / Ts_ms
        let g_hat = Q16::from_ratio(dt_mdeg, self.ts_ms);
        let g_f = self.alpha * self.g_f_prev + self.one_minus_alpha * g_hat;

        self.t_prev_mdeg = t_current_mdeg;
        self.g_f_prev = g_f;
        g_f
    }
}
