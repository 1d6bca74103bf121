//! Simulated lathe example.
//!
//! Runs the whole controller against a virtual spindle: the sensor and
//! control ticks on one thread, the speed task and a small "UI" on another.
//! Simulated time advances 10 µs per control tick.
//!
//! Pass a TOML file path to use your own configuration.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use electronic_leadscrew::{
    config::units::{InchesPerRev, Rpm},
    encoder::SpindleDirection,
    Clock, LeadscrewSystem, LivenessProbe, SharedState, SimulatedSource, SystemConfig,
};

/// Mock output pin for demonstration.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

/// Clock driven by the simulated tick count.
struct TickClock<'a> {
    ticks: &'a AtomicU64,
    interval_us: u64,
}

impl Clock for TickClock<'_> {
    fn now_us(&mut self) -> u64 {
        self.ticks.load(Ordering::Acquire) * self.interval_us
    }
}

static SHARED: SharedState = SharedState::new();

fn main() {
    println!("=== Simulated Lathe Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => match electronic_leadscrew::load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                return;
            }
        },
        None => SystemConfig::default(),
    };

    let ticks = AtomicU64::new(0);
    let done = AtomicBool::new(false);
    let interval_us = u64::from(config.encoder.update_interval_us);

    let source = SimulatedSource::new(&config.encoder);
    let clock = TickClock {
        ticks: &ticks,
        interval_us,
    };

    let system = match LeadscrewSystem::new(&config, &SHARED, source, MockPin::new(), MockPin::new(), clock) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            return;
        }
    };
    let LeadscrewSystem {
        mut encoder,
        mut leadscrew,
        mut tachometer,
        handle,
    } = system;

    println!("Startup: {}\n", handle.status());

    let tach_every = u64::from(config.tachometer.update_interval_us) / interval_us.max(1);
    let total_ticks = 2_000_000 / interval_us.max(1);

    std::thread::scope(|s| {
        // Sensor + control loop, with the speed task on the same timebase
        s.spawn(|| {
            encoder.source_mut().set_speed(Rpm(400.0));

            for tick in 1..=total_ticks {
                if tick == total_ticks / 2 {
                    encoder.source_mut().set_direction(SpindleDirection::Reverse);
                }

                if let Err(e) = encoder.tick().and_then(|_| leadscrew.tick()) {
                    eprintln!("Control tick failed: {}", e);
                    break;
                }

                ticks.store(tick, Ordering::Release);
                if tick % tach_every.max(1) == 0 {
                    tachometer.tick();
                }

                // Slow down so the UI thread gets to watch
                if tick % 2_000 == 0 {
                    std::thread::sleep(Duration::from_millis(2));
                }
            }
            done.store(true, Ordering::Release);
        });

        // UI
        s.spawn(|| {
            let mut probe = LivenessProbe::new();
            let mut step = 0u32;

            while !done.load(Ordering::Acquire) {
                match step {
                    0 => {
                        match handle.set_thread_tpi(20) {
                            Ok(()) => handle.engage(true),
                            Err(e) => println!("Could not set 20 TPI: {}", e),
                        }
                    }
                    2 => {
                        let applied = handle.set_feed_rate(InchesPerRev(0.5));
                        println!("Requested 0.5 in/rev, applied {:?}", applied.map(|f| f.0));
                    }
                    4 => handle.engage(false),
                    _ => {}
                }

                let liveness = probe.poll(handle.watchdog());
                println!("[{:?}] {}", liveness, handle.status());

                step += 1;
                std::thread::sleep(Duration::from_millis(20));
            }
        });
    });

    let position = leadscrew.position();
    println!(
        "\nFinal: spindle {} counts, stepper at {} (target {})",
        handle.spindle_position(),
        position.current(),
        position.desired()
    );
}
