//! Lock-free cells for values crossing execution contexts.

use core::sync::atomic::{AtomicU32, Ordering};

/// An `f32` that can be published from one context and read from another.
///
/// Stored as its bit pattern in an [`AtomicU32`]; loads and stores are
/// single atomic operations.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// A cell holding `0.0`.
    pub const fn zero() -> Self {
        Self(AtomicU32::new(0))
    }

    /// A cell holding `value`.
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Read the current value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Replace the current value.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::zero()
    }
}
