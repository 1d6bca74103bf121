//! Commanded versus achieved stepper position.

/// Direction of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward larger positions.
    Forward,
    /// Toward smaller positions.
    Reverse,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// Stepper position pair in steps.
///
/// `current` is where the motor has been stepped to, `desired` is where the
/// synchronization loop wants it. Only [`step`](Self::step) moves `current`,
/// one step at a time toward `desired`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    current: i64,
    desired: i64,
}

impl Position {
    /// Position pair at rest at `steps`.
    #[inline]
    pub fn at(steps: i64) -> Self {
        Self {
            current: steps,
            desired: steps,
        }
    }

    /// Steps actually issued.
    #[inline]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Commanded position.
    #[inline]
    pub fn desired(&self) -> i64 {
        self.desired
    }

    /// Signed steps still to go (`desired - current`).
    #[inline]
    pub fn error(&self) -> i64 {
        self.desired - self.current
    }

    /// Set the commanded position.
    #[inline]
    pub fn set_desired(&mut self, steps: i64) {
        self.desired = steps;
    }

    /// Move the commanded position by a relative amount.
    #[inline]
    pub fn advance(&mut self, delta: i64) {
        self.desired += delta;
    }

    /// Drop any outstanding command by moving `desired` onto `current`.
    #[inline]
    pub fn hold(&mut self) {
        self.desired = self.current;
    }

    /// Declare the motor to already be at `desired`.
    #[inline]
    pub fn snap(&mut self) {
        self.current = self.desired;
    }

    /// Direction of the next step, if any.
    #[inline]
    pub fn next_step(&self) -> Option<Direction> {
        match self.error() {
            0 => None,
            e if e > 0 => Some(Direction::Forward),
            _ => Some(Direction::Reverse),
        }
    }

    /// Record one issued step.
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.current += direction.sign();
    }
}
