//! Animation driver — a restartable periodic tick source.
//!
//! The driver owns no state of its own: each tick hands a `&mut T` to the
//! callback registered with [`AnimationDriver::start`]. It is polled from
//! the caller's single event loop through [`AnimationDriver::tick`], so a
//! callback can never run while a previous one is still executing.

use std::ops::ControlFlow;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Tick period used when none is configured.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

type TickFn<T> = Box<dyn FnMut(&mut T) -> ControlFlow<()>>;

struct Running<T> {
    period: Duration,
    interval: Option<Interval>,
    on_tick: TickFn<T>,
}

/// Periodic driver invoking a callback on a borrowed target.
///
/// Returning [`ControlFlow::Break`] from the callback stops the driver.
pub struct AnimationDriver<T> {
    running: Option<Running<T>>,
}

impl<T> Default for AnimationDriver<T> {
    fn default() -> Self {
        Self { running: None }
    }
}

impl<T> AnimationDriver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) ticking every `period` with `on_tick`.
    ///
    /// The first tick happens one full period after the first call to
    /// [`tick`](Self::tick). A zero period is raised to one millisecond.
    pub fn start<F>(&mut self, period: Duration, on_tick: F)
    where
        F: FnMut(&mut T) -> ControlFlow<()> + 'static,
    {
        self.running = Some(Running {
            period: period.max(Duration::from_millis(1)),
            interval: None,
            on_tick: Box::new(on_tick),
        });
    }

    /// Stop ticking. Returns whether the driver was running.
    pub fn stop(&mut self) -> bool {
        self.running.take().is_some()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Invoke the callback once, right now.
    ///
    /// Returns `Break` without calling anything when the driver is stopped.
    pub fn fire(&mut self, target: &mut T) -> ControlFlow<()> {
        let Some(running) = self.running.as_mut() else {
            return ControlFlow::Break(());
        };
        let flow = (running.on_tick)(target);
        if flow.is_break() {
            self.running = None;
        }
        flow
    }

    /// Wait for the next period, then [`fire`](Self::fire).
    ///
    /// Never completes while the driver is stopped, which makes it safe to
    /// use as a `tokio::select!` branch.
    pub async fn tick(&mut self, target: &mut T) -> ControlFlow<()> {
        match self.running.as_mut() {
            Some(running) => {
                let period = running.period;
                let interval = running.interval.get_or_insert_with(|| {
                    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    interval
                });
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
        self.fire(target)
    }
}
