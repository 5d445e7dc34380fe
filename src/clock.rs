use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Fixed-period timer polled by the main loop.
///
/// Fires at most once per poll. Fire instants stay on the grid laid down
/// by `start`, so late polls do not push later fires back; periods missed
/// while the loop was busy are not replayed.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    last: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Arms the timer; the first fire is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn stop(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true and re-arms when a full period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(last) = self.last else {
            return false;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.period {
            return false;
        }

        self.last = Some(now - phase_offset(elapsed, self.period));
        true
    }
}

/// Time past the most recent period boundary.
fn phase_offset(elapsed: Duration, period: Duration) -> Duration {
    let period_nanos = period.as_nanos();
    if period_nanos == 0 {
        return Duration::ZERO;
    }

    let offset = elapsed.as_nanos() % period_nanos;
    Duration::from_nanos(u64::try_from(offset).unwrap_or(0))
}

/// Whole seconds of play, displayed as `MM:SS`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ElapsedTime {
    seconds: u32,
}

impl ElapsedTime {
    pub fn increment(&mut self) {
        self.seconds = self.seconds.saturating_add(1);
    }

    pub fn clear(&mut self) {
        self.seconds = 0;
    }

    #[must_use]
    pub fn seconds(self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// What fired during one [`Clock::poll`].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ClockFire {
    pub tick: bool,
    pub second: bool,
}

/// Simulation and display timers, started and stopped together.
#[derive(Debug, Clone)]
pub struct Clock {
    simulation: Ticker,
    display: Ticker,
    elapsed: ElapsedTime,
}

impl Clock {
    #[must_use]
    pub fn new(tick_interval: Duration, display_interval: Duration) -> Self {
        Self {
            simulation: Ticker::new(tick_interval),
            display: Ticker::new(display_interval),
            elapsed: ElapsedTime::default(),
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.simulation.start(now);
        self.display.start(now);
    }

    pub fn stop(&mut self) {
        self.simulation.stop();
        self.display.stop();
    }

    /// Stops both timers and zeroes the elapsed time.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed.clear();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.simulation.is_armed()
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.simulation.period()
    }

    /// Polls both timers. A display fire increments the elapsed time.
    pub fn poll(&mut self, now: Instant) -> ClockFire {
        let fire = ClockFire {
            tick: self.simulation.poll(now),
            second: self.display.poll(now),
        };

        if fire.second {
            self.elapsed.increment();
        }

        fire
    }
}

/// Rejects a call while another one is still in flight.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
}

impl SingleFlight {
    /// Enters the guarded section, or returns `None` when it is occupied.
    pub fn try_enter(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| FlightGuard { owner: self })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the [`SingleFlight`] when dropped.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    owner: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.owner.busy.store(false, Ordering::Release);
    }
}
