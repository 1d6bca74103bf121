//! Sensor sampling tick.

use crate::config::EncoderConfig;
use crate::error::{ConfigError, Result};

use super::counters::EncoderCounters;
use super::source::PositionSource;

/// Widest single-turn code a sensor frame can carry.
const MAX_RESOLUTION_BITS: u8 = 24;

/// Shortest signed distance from `previous` to `current` on a circle of
/// `2^resolution_bits` codes.
///
/// A raw step of more than half a turn is taken to be the short way round the
/// other direction. The spindle therefore must not move half a revolution or
/// more between two samples; faster motion aliases silently.
///
/// # Panics
///
/// Panics if `resolution_bits` is outside 1..=24, the range [`Encoder::new`]
/// accepts.
#[inline]
pub fn wrap_delta(previous: u32, current: u32, resolution_bits: u8) -> i32 {
    assert!(
        (1..=MAX_RESOLUTION_BITS).contains(&resolution_bits),
        "resolution_bits must be in 1..=24, got {}",
        resolution_bits
    );

    let modulus = 1i32 << resolution_bits;
    let half = modulus / 2;

    let mut diff = current as i32 - previous as i32;
    if diff > half {
        diff -= modulus;
    } else if diff < -half {
        diff += modulus;
    }
    diff
}

/// Spindle position sensor, owned by the sampling context.
///
/// Each [`tick`](Self::tick) samples the source once and publishes the
/// unwrapped motion into the shared [`EncoderCounters`].
#[derive(Debug)]
pub struct Encoder<'a, S> {
    source: S,
    counters: &'a EncoderCounters,
    resolution_bits: u8,
    mask: u32,
    /// Decoded code from the previous sample.
    last: u32,
}

impl<'a, S: PositionSource> Encoder<'a, S> {
    /// Create a sensor and take the baseline sample.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution_bits` is outside 1..=24 or the
    /// baseline sample fails.
    pub fn new(source: S, counters: &'a EncoderCounters, resolution_bits: u8) -> Result<Self> {
        if resolution_bits == 0 || resolution_bits > MAX_RESOLUTION_BITS {
            return Err(ConfigError::InvalidResolution(resolution_bits).into());
        }

        let mask = (1u32 << resolution_bits) - 1;
        let mut encoder = Self {
            source,
            counters,
            resolution_bits,
            mask,
            last: 0,
        };
        encoder.last = encoder.read()?;
        Ok(encoder)
    }

    /// Create a sensor from its configuration section.
    pub fn from_config(source: S, counters: &'a EncoderCounters, config: &EncoderConfig) -> Result<Self> {
        Self::new(source, counters, config.resolution_bits)
    }

    fn read(&mut self) -> Result<u32> {
        let code = self.source.sample()?;
        Ok(self.source.decode(code) & self.mask)
    }

    /// Sample once and publish the motion since the previous sample.
    ///
    /// Returns the signed count added. On a failed sample nothing is
    /// published and the baseline is kept, so the next good sample picks up
    /// the whole move.
    pub fn tick(&mut self) -> Result<i32> {
        let position = self.read()?;
        let diff = wrap_delta(self.last, position, self.resolution_bits);
        self.last = position;
        self.counters.record(diff);
        Ok(diff)
    }

    /// Decoded single-turn position from the latest sample.
    #[inline]
    pub fn position(&self) -> u32 {
        self.last
    }

    /// Shared counters this sensor publishes into.
    #[inline]
    pub fn counters(&self) -> &'a EncoderCounters {
        self.counters
    }

    /// Borrow the sampling back-end.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the sampling back-end, e.g. to steer a simulator.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::gray;
    use crate::error::{EncoderError, Error};

    /// Plays back binary counts as Gray codes, then fails.
    struct Script {
        counts: &'static [u32],
        next: usize,
    }

    impl PositionSource for Script {
        fn sample(&mut self) -> Result<u32> {
            let count = *self.counts.get(self.next).ok_or(EncoderError::Bus)?;
            self.next += 1;
            Ok(gray::encode(count))
        }
    }

    fn script(counts: &'static [u32]) -> Script {
        Script { counts, next: 0 }
    }

    #[test]
    fn test_wrap_forward_across_zero() {
        assert_eq!(wrap_delta(4090, 3, 12), 9);
    }

    #[test]
    fn test_wrap_backward_across_zero() {
        assert_eq!(wrap_delta(3, 4090, 12), -9);
    }

    #[test]
    fn test_no_wrap_inside_half_turn() {
        assert_eq!(wrap_delta(100, 2148, 12), 2048);
        assert_eq!(wrap_delta(2148, 100, 12), -2048);
        assert_eq!(wrap_delta(100, 2149, 12), -2047);
    }

    #[test]
    fn test_wrap_at_widest_resolution() {
        assert_eq!(wrap_delta((1 << 24) - 2, 1, 24), 3);
    }

    #[test]
    #[should_panic(expected = "resolution_bits must be in 1..=24")]
    fn test_wrap_rejects_oversized_resolution() {
        wrap_delta(0, 1, 32);
    }

    #[test]
    #[should_panic(expected = "resolution_bits must be in 1..=24")]
    fn test_wrap_rejects_zero_resolution() {
        wrap_delta(0, 1, 0);
    }

    #[test]
    fn test_tick_publishes_unwrapped_motion() {
        let counters = EncoderCounters::new();
        let mut encoder = Encoder::new(script(&[4090, 4095, 3, 10]), &counters, 12).unwrap();
        assert_eq!(encoder.position(), 4090);

        assert_eq!(encoder.tick().unwrap(), 5);
        assert_eq!(encoder.tick().unwrap(), 4);
        assert_eq!(encoder.tick().unwrap(), 7);

        assert_eq!(counters.cumulative_position(), 16);
        assert_eq!(counters.drain_delta(), 16);
    }

    #[test]
    fn test_high_bits_are_masked() {
        let counters = EncoderCounters::new();
        // Multi-turn bits above the 12-bit single-turn field
        let mut encoder = Encoder::new(script(&[0x5000 | 10, 0x5000 | 12]), &counters, 12).unwrap();
        assert_eq!(encoder.position(), 10);
        assert_eq!(encoder.tick().unwrap(), 2);
    }

    #[test]
    fn test_failed_sample_keeps_baseline() {
        let counters = EncoderCounters::new();
        let mut encoder = Encoder::new(script(&[7]), &counters, 12).unwrap();

        assert_eq!(encoder.tick(), Err(Error::Encoder(EncoderError::Bus)));
        assert_eq!(encoder.position(), 7);
        assert_eq!(counters.cumulative_position(), 0);
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        let counters = EncoderCounters::new();
        let result = Encoder::new(script(&[0]), &counters, 0);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidResolution(0)))
        ));
    }
}
