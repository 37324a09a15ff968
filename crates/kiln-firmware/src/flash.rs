//! `kiln_core::persistence::FlashPage` backed by the STM32 internal flash.
//!
//! Settings and programs occupy the last two sectors of flash so application
//! code never shares an erase granule with persisted records.

use embassy_stm32::flash::{Flash, FLASH_BASE};
use kiln_core::persistence::FlashPage;

const SETTINGS_SECTOR_OFFSET: u32 = 0x000F_F800;
const PROGRAMS_SECTOR_OFFSET: u32 = 0x000F_FC00;
const SECTOR_SIZE: u32 = 1024;

pub struct FlashRegion<'a> {
    flash: &'a mut Flash<'static>,
    offset: u32,
}

impl<'a> FlashRegion<'a> {
    pub fn settings(flash: &'a mut Flash<'static>) -> Self {
        Self { flash, offset: SETTINGS_SECTOR_OFFSET }
    }

    pub fn programs(flash: &'a mut Flash<'static>) -> Self {
        Self { flash, offset: PROGRAMS_SECTOR_OFFSET }
    }
}

impl<'a> FlashPage for FlashRegion<'a> {
    const SIZE: usize = SECTOR_SIZE as usize;

    fn read(&self, buf: &mut [u8]) {
        let base = (FLASH_BASE as u32 + self.offset) as *const u8;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = unsafe { core::ptr::read_volatile(base.add(i)) };
        }
    }

    fn erase(&mut self) {
        let _ = self.flash.blocking_erase(self.offset, self.offset + SECTOR_SIZE);
    }

    fn write(&mut self, data: &[u8]) {
        let _ = self.flash.blocking_write(self.offset, data);
    }
}
