#![cfg_attr(not(test), no_std)]

//! MAX7219 (8x8 LED matrix, cascaded) driver primitives.

pub mod protocol;

use embedded_hal::spi::SpiDevice;

use protocol::{ChainPacket, MAX_CHAIN_LEN, MAX_INTENSITY, register};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Number of cascaded devices.
    pub chain_len: usize,
    /// Modules are mounted upside down.
    pub mirrored: bool,
    /// Intensity applied by [`Max7219::initialize`] (0..=15).
    pub intensity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_len: 4,
            mirrored: false,
            intensity: 2,
        }
    }
}

impl Config {
    pub const fn with_chain_len(mut self, chain_len: usize) -> Self {
        self.chain_len = chain_len;
        self
    }

    pub const fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    pub const fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// Device index, chain length or level outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr> = Result<(), Error<SpiErr>>;

/// MAX7219 daisy-chain driver.
#[derive(Debug)]
pub struct Max7219<SPI> {
    spi: SPI,
    config: Config,
}

impl<SPI> Max7219<SPI>
where
    SPI: SpiDevice<u8>,
{
    /// Creates a new driver instance. Nothing is sent until [`Self::initialize`].
    pub fn new(spi: SPI, config: Config) -> Self {
        Self { spi, config }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Number of cascaded devices.
    pub fn chain_len(&self) -> usize {
        self.config.chain_len
    }

    /// Releases the owned bus.
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Brings every device out of shutdown in raw matrix mode.
    pub fn initialize(&mut self) -> DriverResult<SPI::Error> {
        if self.config.chain_len == 0 || self.config.chain_len > MAX_CHAIN_LEN {
            return Err(Error::InvalidInput);
        }

        self.broadcast(register::DISPLAY_TEST, 0x00)?;
        self.broadcast(register::SCAN_LIMIT, 0x07)?;
        self.broadcast(register::DECODE_MODE, 0x00)?;
        self.set_intensity(self.config.intensity)?;
        self.clear_all()?;
        self.broadcast(register::SHUTDOWN, 0x01)
    }

    /// Sets the same intensity on all devices.
    pub fn set_intensity(&mut self, level: u8) -> DriverResult<SPI::Error> {
        if level > MAX_INTENSITY {
            return Err(Error::InvalidInput);
        }
        self.config.intensity = level;
        self.broadcast(register::INTENSITY, level)
    }

    /// Draws a packed 8x8 image on one device.
    pub fn draw_image(&mut self, device: usize, image: u64) -> DriverResult<SPI::Error> {
        for (digit, bits) in protocol::image_rows(image, self.config.mirrored) {
            let packet = protocol::build_chain_packet(self.config.chain_len, device, digit, bits)
                .ok_or(Error::InvalidInput)?;
            self.send(&packet)?;
        }

        Ok(())
    }

    /// Blanks every device, one row register at a time.
    pub fn clear_all(&mut self) -> DriverResult<SPI::Error> {
        for row in 0..protocol::ROWS as u8 {
            self.broadcast(register::DIGIT_0 + row, 0x00)?;
        }

        Ok(())
    }

    fn broadcast(&mut self, register: u8, data: u8) -> DriverResult<SPI::Error> {
        let packet = protocol::build_broadcast_packet(self.config.chain_len, register, data)
            .ok_or(Error::InvalidInput)?;
        self.send(&packet)
    }

    fn send(&mut self, packet: &ChainPacket) -> DriverResult<SPI::Error> {
        self.spi.write(packet.as_bytes()).map_err(Error::Spi)
    }
}
