//! Control-loop liveness check built on the watchdog counter.

/// Result of one liveness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Liveness {
    /// First poll; nothing to compare against yet.
    Unknown,
    /// The counter moved since the last poll.
    Advancing,
    /// The counter did not move since the last poll.
    Stalled,
}

/// Compares successive watchdog readings.
///
/// Poll it from a slower context (UI, status task). Between two polls the
/// control loop should have run at least once.
#[derive(Debug, Clone, Default)]
pub struct LivenessProbe {
    last: Option<u32>,
}

impl LivenessProbe {
    /// Create a probe with no previous reading.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record `counter` and classify it against the previous reading.
    pub fn poll(&mut self, counter: u32) -> Liveness {
        let previous = self.last.replace(counter);

        match previous {
            None => Liveness::Unknown,
            Some(last) if last != counter => Liveness::Advancing,
            Some(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Control loop stalled at watchdog {}", counter);
                Liveness::Stalled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_sequence() {
        let mut probe = LivenessProbe::new();

        assert_eq!(probe.poll(7), Liveness::Unknown);
        assert_eq!(probe.poll(12), Liveness::Advancing);
        assert_eq!(probe.poll(12), Liveness::Stalled);
        assert_eq!(probe.poll(13), Liveness::Advancing);
    }

    #[test]
    fn test_wrapped_counter_advances() {
        let mut probe = LivenessProbe::new();
        probe.poll(u32::MAX);
        assert_eq!(probe.poll(0), Liveness::Advancing);
    }
}
