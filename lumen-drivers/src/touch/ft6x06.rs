//! FT6x06 capacitive touch controller driver (I2C)
//!
//! Covers the FocalTech FT6206/FT6236/FT6336 family. The controller is
//! polled over I2C: one register read answers "how many fingers", a
//! four-byte read fetches the primary touch point as 12-bit coordinates
//! packed into nibbles. Coordinates are in the sensor's native frame;
//! rotation mapping happens upstream in the bridge.

use embedded_hal::i2c::I2c;

use lumen_core::traits::touch::{RawPoint, TouchController, TouchError};

/// FT6x06 register addresses
pub mod reg {
    /// Number of active touch points (low nibble)
    pub const TD_STATUS: u8 = 0x02;
    /// Touch point 1, x high nibble + event flags
    pub const P1_XH: u8 = 0x03;
    /// Touch detection threshold
    pub const TH_GROUP: u8 = 0x80;
    /// Chip identifier
    pub const CHIP_ID: u8 = 0xA3;
    /// Vendor identifier
    pub const VENDOR_ID: u8 = 0xA8;
}

/// Fixed I2C address of the FT6x06 family
pub const I2C_ADDR: u8 = 0x38;

/// Touch threshold matching the panel vendor's reference code
pub const DEFAULT_THRESHOLD: u8 = 40;

/// FocalTech vendor id
const VENDOR_FOCALTECH: u8 = 0x11;
/// Known chip ids: FT6206, FT6236, FT6336
const KNOWN_CHIPS: [u8; 3] = [0x06, 0x36, 0x64];

/// FT6x06 over an I2C bus
pub struct Ft6x06<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Ft6x06<I2C> {
    /// Create a driver at the family's fixed address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDR)
    }

    /// Create a driver at a non-standard address
    pub fn with_address(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Program the touch threshold and verify the chip identifies itself
    ///
    /// Fails with [`TouchError::NotReady`] when something else (or
    /// nothing) answers at the address; the caller is expected to fall
    /// back to a degraded, touchless mode in that case.
    pub fn begin(&mut self, threshold: u8) -> Result<(), TouchError> {
        self.write_reg(reg::TH_GROUP, threshold)?;

        let vendor = self.read_reg(reg::VENDOR_ID)?;
        if vendor != VENDOR_FOCALTECH {
            return Err(TouchError::NotReady);
        }
        let chip = self.read_reg(reg::CHIP_ID)?;
        if !KNOWN_CHIPS.contains(&chip) {
            return Err(TouchError::NotReady);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("FT6x06 ready, chip id 0x{:02x}", chip);
        Ok(())
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, TouchError> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[register], &mut value)
            .map_err(|_| TouchError::Bus)?;
        Ok(value[0])
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), TouchError> {
        self.i2c
            .write(self.addr, &[register, value])
            .map_err(|_| TouchError::Bus)
    }
}

impl<I2C: I2c> TouchController for Ft6x06<I2C> {
    fn is_touched(&mut self) -> Result<bool, TouchError> {
        // 0x0F..0xFF read back during controller boot; only 1 or 2 real
        // fingers count as touched.
        let count = self.read_reg(reg::TD_STATUS)? & 0x0F;
        Ok(count == 1 || count == 2)
    }

    fn read_point(&mut self) -> Result<RawPoint, TouchError> {
        let mut data = [0u8; 4];
        self.i2c
            .write_read(self.addr, &[reg::P1_XH], &mut data)
            .map_err(|_| TouchError::Bus)?;

        // 12-bit coordinates; the top bits of the high bytes carry event
        // flags, not position.
        let x = u16::from(data[0] & 0x0F) << 8 | u16::from(data[1]);
        let y = u16::from(data[2] & 0x0F) << 8 | u16::from(data[3]);
        Ok(RawPoint { x, y })
    }
}
