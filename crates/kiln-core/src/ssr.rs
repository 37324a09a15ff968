//! Time-proportioning SSR driver.
//!
//! Converts a continuous duty in `[0, 1]` into ON/OFF pulses within a fixed
//! window, clamping sub-minimum pulses to fully off/on so the relay is never
//! asked to switch faster than its rated minimum, and giving the door sensor
//! an unconditional override that doesn't disturb window bookkeeping.

use crate::fixed_point::Q16;

pub struct SsrResult {
    pub ssr_on: bool,
    pub window_started: bool,
}

pub struct SsrWindow {
    window_ms: u32,
    min_switch_ms: u32,
    window_start_ms: u32,
    ton_ms: u32,
    has_window: bool,
}

impl SsrWindow {
    pub fn new(window_seconds: u32, min_switch_seconds: u32) -> Self {
        assert!(min_switch_seconds * 2 < window_seconds);
        Self {
            window_ms: window_seconds * 1000,
            min_switch_ms: min_switch_seconds * 1000,
            window_start_ms: 0,
            ton_ms: 0,
            has_window: false,
        }
    }

    /// Forces the SSR off immediately and discards the in-progress window,
    /// so a pulse already scheduled on this tick can't carry over to the
    /// next. Used when a program stop must take effect synchronously rather
    /// than waiting for the window to elapse naturally.
    pub fn force_off(&mut self) {
        self.ton_ms = 0;
        self.has_window = false;
    }

    fn clamp_duty(&self, u: Q16) -> Q16 {
        let min_frac = Q16::from_ratio(self.min_switch_ms as i32, self.window_ms as i32);
        if u < min_frac {
            Q16::ZERO
        } else if u > Q16::ONE - min_frac {
            Q16::ONE
        } else {
            u
        }
    }

    /// `now_ms` is a monotonic millisecond clock. Returns whether the SSR
    /// (all three coils, driven identically) should be on this tick.
    pub fn update(&mut self, now_ms: u32, u_raw: Q16, door_open: bool) -> SsrResult {
        let u = self.clamp_duty(u_raw);

        let elapsed = now_ms.wrapping_sub(self.window_start_ms);
        let mut window_started = false;
        if !self.has_window || elapsed >= self.window_ms {
            self.window_start_ms = now_ms;
            self.ton_ms = ((u.0 as i64 * self.window_ms as i64) >> 16) as u32;
            self.has_window = true;
            window_started = true;
        }

        let elapsed = now_ms.wrapping_sub(self.window_start_ms);
        let scheduled_on = elapsed < self.ton_ms;
        let ssr_on = scheduled_on && !door_open;

        SsrResult { ssr_on, window_started }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_duty_is_on_whole_window() {
        let mut w = SsrWindow::new(20, 5);
        for t in (0..20_000).step_by(1000) {
            let r = w.update(t, Q16::ONE, false);
            assert!(r.ssr_on, "t={t}");
        }
    }

    #[test]
    fn zero_duty_is_off_whole_window() {
        let mut w = SsrWindow::new(20, 5);
        for t in (0..20_000).step_by(1000) {
            let r = w.update(t, Q16::ZERO, false);
            assert!(!r.ssr_on, "t={t}");
        }
    }

    #[test]
    fn minimum_pulse_is_enforced() {
        let mut w = SsrWindow::new(20, 5);
        // 10% duty on a 20s window = 2s on, below the 5s minimum -> forced to 0
        let r = w.update(0, Q16::from_float(0.10), false);
        assert!(!r.ssr_on);
        assert_eq!(w.ton_ms, 0);
    }

    #[test]
    fn door_open_overrides_without_disturbing_window() {
        let mut w = SsrWindow::new(20, 5);
        w.update(0, Q16::from_float(0.5), false);
        let r = w.update(1000, Q16::from_float(0.5), true);
        assert!(!r.ssr_on);
        assert!(!r.window_started);
        // closing the door mid-window resumes the same schedule
        let r2 = w.update(2000, Q16::from_float(0.5), false);
        assert!(r2.ssr_on);
        assert!(!r2.window_started);
    }

    #[test]
    fn force_off_discards_the_scheduled_pulse() {
        let mut w = SsrWindow::new(20, 5);
        let r = w.update(0, Q16::ONE, false);
        assert!(r.ssr_on);

        w.force_off();
        // next tick starts a fresh window rather than honoring the stale ton_ms
        let r2 = w.update(1000, Q16::ZERO, false);
        assert!(!r2.ssr_on);
        assert!(r2.window_started);
    }
}
