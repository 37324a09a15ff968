//! Independent watchdog feed.
//!
//! Fed once per tick from the same task that drives the controller core, so
//! a hung tick loop resets the MCU instead of leaving the SSRs in whatever
//! state they were last written to.

use embassy_stm32::wdg::IndependentWatchdog;

pub struct Watchdog<'a> {
    inner: IndependentWatchdog<'a>,
}

impl<'a> Watchdog<'a> {
    pub fn new(mut inner: IndependentWatchdog<'a>) -> Self {
        inner.unleash();
        Self { inner }
    }

    #[inline]
    pub fn feed(&mut self) {
        self.inner.feed();
    }
}
