use embedded_hal::spi::SpiDevice;
use log::debug;
use max7219::{Config, DriverResult, Error, Max7219, protocol::MAX_INTENSITY};
use wordseek_core::board::SegmentDriver;

/// The two 5-module displays as one MAX7219 chain.
///
/// Board segment `n` is chain device `n`: the upper display sits closest to
/// the MCU.
#[derive(Debug)]
pub struct MatrixChain<SPI> {
    driver: Max7219<SPI>,
}

impl<SPI> MatrixChain<SPI>
where
    SPI: SpiDevice<u8>,
{
    pub fn new(spi: SPI, config: Config) -> Self {
        Self {
            driver: Max7219::new(spi, config),
        }
    }

    pub fn initialize(&mut self) -> DriverResult<SPI::Error> {
        self.driver.initialize()?;
        debug!(
            "display: chain ready devices={} mirrored={}",
            self.driver.chain_len(),
            self.driver.config().mirrored
        );
        Ok(())
    }

    /// Draws the same glyph on every module (boot animation frames).
    pub fn fill(&mut self, glyph: u64) -> DriverResult<SPI::Error> {
        for device in 0..self.driver.chain_len() {
            self.driver.draw_image(device, glyph)?;
        }
        Ok(())
    }

    pub fn release(self) -> SPI {
        self.driver.release()
    }
}

impl<SPI> SegmentDriver for MatrixChain<SPI>
where
    SPI: SpiDevice<u8>,
{
    type Error = Error<SPI::Error>;

    fn draw_glyph(&mut self, segment: usize, glyph: u64) -> DriverResult<SPI::Error> {
        self.driver.draw_image(segment, glyph)
    }

    fn set_brightness(&mut self, level: u8) -> DriverResult<SPI::Error> {
        self.driver.set_intensity(level.min(MAX_INTENSITY))
    }

    fn clear_all(&mut self) -> DriverResult<SPI::Error> {
        self.driver.clear_all()
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::spi::{ErrorType, Operation};
    use heapless::Vec;

    use super::*;

    const CHAIN: usize = 10;

    #[derive(Default)]
    struct RecordingSpi {
        frames: Vec<Vec<u8, 32>, 128>,
    }

    impl ErrorType for RecordingSpi {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice<u8> for RecordingSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
            for operation in operations {
                if let Operation::Write(bytes) = operation {
                    let _ = self.frames.push(Vec::from_slice(*bytes).unwrap_or_default());
                }
            }
            Ok(())
        }
    }

    fn chain() -> MatrixChain<RecordingSpi> {
        MatrixChain::new(
            RecordingSpi::default(),
            Config::default().with_chain_len(CHAIN),
        )
    }

    #[test]
    fn segment_maps_to_chain_device() {
        let mut chain = chain();
        chain.draw_glyph(0, 0xff).unwrap();

        let spi = chain.release();
        // Row 0 of device 0 is shifted out last.
        let first = &spi.frames[0];
        assert_eq!(first.len(), CHAIN * 2);
        assert_eq!(&first[first.len() - 2..], &[0x01, 0xff]);
        assert!(first[..first.len() - 2].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn out_of_range_segment_is_rejected() {
        let mut chain = chain();
        assert_eq!(chain.draw_glyph(CHAIN, 1), Err(Error::InvalidInput));
    }

    #[test]
    fn brightness_is_clamped_to_intensity_range() {
        let mut chain = chain();
        chain.set_brightness(200).unwrap();

        let spi = chain.release();
        let frame = spi.frames.last().unwrap();
        assert!(frame.chunks(2).all(|pair| pair == [0x0A, MAX_INTENSITY]));
    }

    #[test]
    fn fill_draws_every_module() {
        let mut chain = chain();
        chain.fill(0).unwrap();
        // Eight row registers per module.
        assert_eq!(chain.release().frames.len(), CHAIN * 8);
    }
}
