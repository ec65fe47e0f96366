//! ILI9341 display controller driver (SPI)
//!
//! Drives the 240x320 ILI9341 TFT controller over a 4-wire SPI interface
//! with a data/command pin. Pixel data is RGB565, sent big-endian on the
//! wire. The panel rotation is fixed at construction: it programs the
//! MADCTL scan-order bits and decides the logical width/height reported
//! to the bridge.
//!
//! The controller keeps its memory write pointer across chip-select
//! cycles, so each command and each pixel burst can be its own
//! `SpiDevice` transaction.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use lumen_core::geometry::{Rect, Size};
use lumen_core::rotation::Rotation;
use lumen_core::traits::display::{DisplayError, DisplayLink};

/// ILI9341 command opcodes
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Exit sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control (scan order / rotation)
    pub const MADCTL: u8 = 0x36;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL bits
mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// BGR subpixel order
    pub const BGR: u8 = 0x08;
}

/// Panel size in the controller's native orientation
pub const NATIVE_SIZE: Size = Size::new(240, 320);

/// Pixels per SPI burst when filling
const FILL_CHUNK: usize = 64;

/// ILI9341 over SPI with data/command and reset pins
pub struct Ili9341<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    rotation: Rotation,
    size: Size,
}

impl<SPI, DC, RST> Ili9341<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver; the panel stays dark until [`init`](Self::init)
    pub fn new(spi: SPI, dc: DC, rst: RST, rotation: Rotation) -> Self {
        Self {
            spi,
            dc,
            rst,
            rotation,
            size: rotation.logical_size(NATIVE_SIZE),
        }
    }

    /// Hardware-reset and configure the controller
    ///
    /// Delay lengths follow the datasheet minimums for reset recovery and
    /// sleep-out.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Bus)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(|_| DisplayError::Bus)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(|_| DisplayError::Bus)?;
        delay.delay_ms(120);

        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        // 16-bit pixels on both the parallel and serial interfaces
        self.command(cmd::COLMOD, &[0x55])?;
        self.command(cmd::MADCTL, &[self.madctl_value()])?;

        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(20);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ILI9341 up: {}x{} at {}",
            self.size.width,
            self.size.height,
            self.rotation
        );
        Ok(())
    }

    /// Fill the whole screen with one color
    pub fn fill_screen(&mut self, color: u16) -> Result<(), DisplayError> {
        let size = self.size;
        self.begin_write();
        let result = self.fill_rect(Rect::new(0, 0, size.width, size.height), color);
        self.end_write();
        result
    }

    fn fill_rect(&mut self, region: Rect, color: u16) -> Result<(), DisplayError> {
        self.set_window(region)?;
        let chunk = [color; FILL_CHUNK];
        let mut remaining = region.area();
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK as u32) as usize;
            self.write_pixels(&chunk[..n])?;
            remaining -= n as u32;
        }
        Ok(())
    }

    fn madctl_value(&self) -> u8 {
        use madctl::*;
        match self.rotation {
            Rotation::Deg0 => MX | BGR,
            Rotation::Deg90 => MV | BGR,
            Rotation::Deg180 => MY | BGR,
            Rotation::Deg270 => MX | MY | MV | BGR,
        }
    }

    /// Send an opcode with its parameter bytes; leaves DC in data mode so
    /// a memory write can stream pixels afterwards
    fn command(&mut self, op: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Bus)?;
        self.spi.write(&[op]).map_err(|_| DisplayError::Bus)?;
        self.dc.set_high().map_err(|_| DisplayError::Bus)?;
        if !args.is_empty() {
            self.spi.write(args).map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }
}

impl<SPI, DC, RST> DisplayLink for Ili9341<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        self.size
    }

    fn begin_write(&mut self) {
        // Chip select is scoped per transfer by the SpiDevice; nothing to
        // hold open here.
    }

    fn set_window(&mut self, region: Rect) -> Result<(), DisplayError> {
        if region.is_empty() || !self.size.contains(&region) {
            return Err(DisplayError::BadRegion);
        }
        // CASET/PASET take inclusive end coordinates.
        let x2 = region.x + region.w - 1;
        let y2 = region.y + region.h - 1;

        let [xs_hi, xs_lo] = region.x.to_be_bytes();
        let [xe_hi, xe_lo] = x2.to_be_bytes();
        self.command(cmd::CASET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;

        let [ys_hi, ys_lo] = region.y.to_be_bytes();
        let [ye_hi, ye_lo] = y2.to_be_bytes();
        self.command(cmd::PASET, &[ys_hi, ys_lo, ye_hi, ye_lo])?;

        self.command(cmd::RAMWR, &[])
    }

    fn write_pixels(&mut self, pixels: &[u16]) -> Result<(), DisplayError> {
        let mut wire = [0u8; FILL_CHUNK * 2];
        for part in pixels.chunks(FILL_CHUNK) {
            for (bytes, px) in wire.chunks_exact_mut(2).zip(part) {
                bytes.copy_from_slice(&px.to_be_bytes());
            }
            self.spi
                .write(&wire[..part.len() * 2])
                .map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    fn end_write(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};
    use embedded_hal::spi::{ErrorKind, Operation};
    use std::rc::Rc;
    use std::vec::Vec;

    /// One SPI write, tagged command or data by the DC level at the time
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Entry {
        Cmd(u8),
        Data(Vec<u8>),
    }

    struct MockSpi {
        log: Rc<RefCell<Vec<Entry>>>,
        dc_level: Rc<Cell<bool>>,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    let entry = if self.dc_level.get() {
                        Entry::Data(bytes.to_vec())
                    } else {
                        Entry::Cmd(bytes[0])
                    };
                    self.log.borrow_mut().push(entry);
                }
            }
            Ok(())
        }
    }

    struct MockPin {
        level: Rc<Cell<bool>>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.level.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.level.set(true);
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type MockDriver = Ili9341<MockSpi, MockPin, MockPin>;

    fn driver(rotation: Rotation) -> (MockDriver, Rc<RefCell<Vec<Entry>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        // DC idles high: `command` leaves the pin in data mode, which is
        // the state `write_pixels` is specified to run in.
        let dc_level = Rc::new(Cell::new(true));
        let spi = MockSpi {
            log: Rc::clone(&log),
            dc_level: Rc::clone(&dc_level),
        };
        let dc = MockPin { level: dc_level };
        let rst = MockPin {
            level: Rc::new(Cell::new(false)),
        };
        (Ili9341::new(spi, dc, rst, rotation), log)
    }

    #[test]
    fn test_logical_size_follows_rotation() {
        assert_eq!(driver(Rotation::Deg0).0.size(), Size::new(240, 320));
        assert_eq!(driver(Rotation::Deg90).0.size(), Size::new(320, 240));
        assert_eq!(driver(Rotation::Deg270).0.size(), Size::new(320, 240));
    }

    #[test]
    fn test_init_sequence() {
        let (mut drv, log) = driver(Rotation::Deg90);
        drv.init(&mut NoopDelay).unwrap();

        let log = log.borrow();
        assert_eq!(log[0], Entry::Cmd(cmd::SWRESET));
        assert_eq!(log[1], Entry::Cmd(cmd::SLPOUT));
        assert_eq!(log[2], Entry::Cmd(cmd::COLMOD));
        assert_eq!(log[3], Entry::Data(vec![0x55]));
        assert_eq!(log[4], Entry::Cmd(cmd::MADCTL));
        // Deg90: row/column exchange, BGR panel
        assert_eq!(log[5], Entry::Data(vec![0x28]));
        assert_eq!(log[6], Entry::Cmd(cmd::DISPON));
    }

    #[test]
    fn test_set_window_programs_inclusive_bounds() {
        let (mut drv, log) = driver(Rotation::Deg0);
        drv.set_window(Rect::new(10, 20, 16, 8)).unwrap();

        let log = log.borrow();
        assert_eq!(
            log.as_slice(),
            &[
                Entry::Cmd(cmd::CASET),
                Entry::Data(vec![0, 10, 0, 25]),
                Entry::Cmd(cmd::PASET),
                Entry::Data(vec![0, 20, 0, 27]),
                Entry::Cmd(cmd::RAMWR),
            ]
        );
    }

    #[test]
    fn test_set_window_rejects_out_of_bounds() {
        let (mut drv, _) = driver(Rotation::Deg0);
        assert_eq!(
            drv.set_window(Rect::new(230, 0, 16, 8)),
            Err(DisplayError::BadRegion)
        );
        assert_eq!(
            drv.set_window(Rect::new(0, 0, 0, 8)),
            Err(DisplayError::BadRegion)
        );
    }

    #[test]
    fn test_write_pixels_is_big_endian_on_the_wire() {
        let (mut drv, log) = driver(Rotation::Deg0);
        drv.write_pixels(&[0x1234, 0xF800]).unwrap();

        let log = log.borrow();
        assert_eq!(log.as_slice(), &[Entry::Data(vec![0x12, 0x34, 0xF8, 0x00])]);
    }

    #[test]
    fn test_write_pixels_chunks_long_runs() {
        let (mut drv, log) = driver(Rotation::Deg0);
        drv.write_pixels(&[0u16; 100]).unwrap();

        let log = log.borrow();
        // 64-pixel bursts: 128 + 72 bytes
        assert_eq!(log.len(), 2);
        assert!(matches!(&log[0], Entry::Data(d) if d.len() == 128));
        assert!(matches!(&log[1], Entry::Data(d) if d.len() == 72));
    }

    #[test]
    fn test_fill_screen_covers_every_pixel() {
        let (mut drv, log) = driver(Rotation::Deg0);
        drv.fill_screen(0x0000).unwrap();

        let data_bytes: usize = log
            .borrow()
            .iter()
            .skip_while(|e| !matches!(e, Entry::Cmd(c) if *c == cmd::RAMWR))
            .filter_map(|e| match e {
                Entry::Data(d) => Some(d.len()),
                Entry::Cmd(_) => None,
            })
            .sum();
        assert_eq!(data_bytes, 240 * 320 * 2);
    }
}
