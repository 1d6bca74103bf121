//! Observable output pin for unit tests.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Output pin whose level and rising-edge count stay visible through clones.
#[derive(Debug, Clone, Default)]
pub(crate) struct TestPin {
    high: Rc<Cell<bool>>,
    rising_edges: Rc<Cell<u32>>,
}

impl TestPin {
    pub(crate) fn is_high(&self) -> bool {
        self.high.get()
    }

    pub(crate) fn rising_edges(&self) -> u32 {
        self.rising_edges.get()
    }
}

impl ErrorType for TestPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for TestPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high.get() {
            self.rising_edges.set(self.rising_edges.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }
}
