//! Sensor sampling back-ends.

use embedded_hal::spi::SpiDevice;

use crate::error::{EncoderError, Result};

use super::gray;

/// Something that yields one absolute position code per call.
///
/// Implementations are owned by the sensor tick and only ever sampled from
/// it.
pub trait PositionSource {
    /// Read one raw code from the sensor.
    fn sample(&mut self) -> Result<u32>;

    /// Turn a raw code into a linear count.
    ///
    /// Sensors in this crate all emit Gray code.
    #[inline]
    fn decode(&self, code: u32) -> u32 {
        gray::decode(code)
    }
}

impl<T: PositionSource + ?Sized> PositionSource for &mut T {
    fn sample(&mut self) -> Result<u32> {
        (**self).sample()
    }

    fn decode(&self, code: u32) -> u32 {
        (**self).decode(code)
    }
}

/// Absolute sensor read as a 24-bit big-endian Gray frame over SPI.
///
/// Only the low `resolution_bits` of the decoded frame are kept by the
/// sensor tick, so multi-turn or status bits in the upper bytes are ignored.
#[derive(Debug)]
pub struct SpiPositionSource<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiPositionSource<SPI> {
    /// Wrap an SPI device.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the SPI device back.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> PositionSource for SpiPositionSource<SPI> {
    fn sample(&mut self) -> Result<u32> {
        let mut frame = [0u8; 3];
        self.spi.read(&mut frame).map_err(|_| EncoderError::Bus)?;
        Ok(u32::from(frame[0]) << 16 | u32::from(frame[1]) << 8 | u32::from(frame[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    /// Replays fixed frames, failing once they run out.
    struct FrameSpi {
        frames: &'static [[u8; 3]],
        next: usize,
    }

    #[derive(Debug)]
    struct Exhausted;

    impl embedded_hal::spi::Error for Exhausted {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for FrameSpi {
        type Error = Exhausted;
    }

    impl SpiDevice for FrameSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> core::result::Result<(), Exhausted> {
            let frame = self.frames.get(self.next).ok_or(Exhausted)?;
            self.next += 1;
            for op in operations {
                if let Operation::Read(buf) = op {
                    buf.copy_from_slice(&frame[..buf.len()]);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_spi_frame_assembly() {
        let spi = FrameSpi {
            frames: &[[0x00, 0x0A, 0xBC], [0x12, 0x34, 0x56]],
            next: 0,
        };
        let mut source = SpiPositionSource::new(spi);

        assert_eq!(source.sample().unwrap(), 0x000ABC);
        assert_eq!(source.sample().unwrap(), 0x123456);
    }

    #[test]
    fn test_spi_failure_maps_to_bus_error() {
        let spi = FrameSpi { frames: &[], next: 0 };
        let mut source = SpiPositionSource::new(spi);

        assert_eq!(
            source.sample(),
            Err(crate::error::Error::Encoder(EncoderError::Bus))
        );
    }

    #[test]
    fn test_default_decode_is_gray() {
        let spi = FrameSpi { frames: &[], next: 0 };
        let source = SpiPositionSource::new(spi);
        assert_eq!(source.decode(gray::encode(1234)), 1234);
    }
}
