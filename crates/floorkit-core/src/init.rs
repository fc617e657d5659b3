//! Retry initializer: wait for a host anchor that may appear late, then run
//! the initialisation callback once.
//!
//! # Design
//! - [`Initializer`] is a pure state machine fed with probe results; it never sleeps.
//! - [`run_initializer`] drives it with a [`Timer`], so the same sequence runs
//!   on tokio natively and on browser timers in wasm.
//! - Give-up is terminal and only logged; there is no caller to report it to.

use std::time::Duration;

use async_trait::async_trait;
use floorkit_config::RetrySettings;
use tracing::{debug, error, info};

/// Where an initialisation run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Probing for the anchor; `attempts` re-checks have been scheduled so far.
    Searching {
        /// Scheduled re-checks so far.
        attempts: u32,
    },
    /// Anchor found; waiting out the configured delay.
    FoundPendingDelay,
    /// Callback has run.
    Initialized,
    /// Retries exhausted without finding the anchor.
    GaveUp,
}

impl InitState {
    /// Whether no further events will change the state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Initialized | Self::GaveUp)
    }
}

/// What the driver must do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Probe again after the interval.
    RetryAfter(Duration),
    /// Run the callback after the delay.
    InitAfter(Duration),
    /// Run the callback now, in the same turn.
    InitNow,
    /// Stop; the anchor never appeared.
    GiveUp,
    /// Nothing to do; the run already finished.
    Idle,
}

/// Retry state machine for one initialisation run.
#[derive(Debug, Clone)]
pub struct Initializer {
    settings: RetrySettings,
    state: InitState,
}

impl Initializer {
    /// Fresh run in [`InitState::Searching`] with no attempts.
    #[must_use]
    pub const fn new(settings: RetrySettings) -> Self {
        Self {
            settings,
            state: InitState::Searching { attempts: 0 },
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> InitState {
        self.state
    }

    /// Settings this run was started with.
    #[must_use]
    pub const fn settings(&self) -> RetrySettings {
        self.settings
    }

    /// Feed the result of one anchor probe.
    pub fn on_probe(&mut self, found: bool) -> InitStep {
        let InitState::Searching { attempts } = self.state else {
            return InitStep::Idle;
        };
        if found {
            if self.settings.init_delay_ms > 0 {
                self.state = InitState::FoundPendingDelay;
                return InitStep::InitAfter(Duration::from_millis(self.settings.init_delay_ms));
            }
            self.state = InitState::Initialized;
            return InitStep::InitNow;
        }
        if attempts < self.settings.max_retries {
            self.state = InitState::Searching {
                attempts: attempts + 1,
            };
            return InitStep::RetryAfter(Duration::from_millis(self.settings.interval_ms));
        }
        self.state = InitState::GaveUp;
        InitStep::GiveUp
    }

    /// Signal that the post-discovery delay elapsed.
    pub fn on_delay_elapsed(&mut self) -> InitStep {
        if self.state == InitState::FoundPendingDelay {
            self.state = InitState::Initialized;
            InitStep::InitNow
        } else {
            InitStep::Idle
        }
    }
}

/// One-shot sleeps used for retry polling and the post-discovery delay.
#[async_trait(?Send)]
pub trait Timer {
    /// Resolve after `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-backed timer for native hosts.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How an initialisation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The callback ran after `retries` re-checks.
    Initialized {
        /// Re-checks scheduled before the anchor was found.
        retries: u32,
    },
    /// The anchor never appeared.
    GaveUp {
        /// Re-checks scheduled before giving up.
        retries: u32,
    },
}

/// Probe for the anchor until it appears or retries run out, then run `init`
/// with it.
///
/// `probe` is called once immediately and once after every scheduled retry.
/// With no init delay the callback runs in the same turn as the successful
/// probe and `timer` is not consulted.
pub async fn run_initializer<A, P, T, F>(
    settings: RetrySettings,
    mut probe: P,
    timer: &T,
    init: F,
) -> InitOutcome
where
    P: FnMut() -> Option<A>,
    T: Timer + ?Sized,
    F: FnOnce(A),
{
    let mut machine = Initializer::new(settings);
    let mut retries = 0;
    loop {
        let found = probe();
        match machine.on_probe(found.is_some()) {
            InitStep::RetryAfter(interval) => {
                retries += 1;
                debug!(
                    attempt = retries,
                    max_retries = settings.max_retries,
                    interval_ms = settings.interval_ms,
                    "anchor not found; retrying"
                );
                timer.sleep(interval).await;
            }
            InitStep::InitAfter(delay) => {
                info!(delay_ms = settings.init_delay_ms, "anchor found; delaying init");
                timer.sleep(delay).await;
                if machine.on_delay_elapsed() == InitStep::InitNow {
                    if let Some(anchor) = found {
                        init(anchor);
                    }
                }
                return InitOutcome::Initialized { retries };
            }
            InitStep::InitNow => {
                info!(retries, "anchor found; initializing");
                if let Some(anchor) = found {
                    init(anchor);
                }
                return InitOutcome::Initialized { retries };
            }
            InitStep::GiveUp | InitStep::Idle => {
                error!(
                    max_retries = settings.max_retries,
                    "anchor never appeared; initialization abandoned"
                );
                return InitOutcome::GaveUp { retries };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct RecordingTimer {
        sleeps: RefCell<Vec<Duration>>,
    }

    #[async_trait(?Send)]
    impl Timer for RecordingTimer {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }

    const fn settings(interval_ms: u64, max_retries: u32, init_delay_ms: u64) -> RetrySettings {
        RetrySettings {
            interval_ms,
            max_retries,
            init_delay_ms,
        }
    }

    #[test]
    fn machine_follows_the_documented_transitions() {
        let mut machine = Initializer::new(settings(100, 1, 0));
        assert_eq!(machine.on_probe(false), InitStep::RetryAfter(Duration::from_millis(100)));
        assert_eq!(machine.state(), InitState::Searching { attempts: 1 });
        assert_eq!(machine.on_probe(false), InitStep::GiveUp);
        assert_eq!(machine.state(), InitState::GaveUp);
        assert_eq!(machine.on_probe(true), InitStep::Idle);
        assert!(machine.state().is_terminal());

        let mut delayed = Initializer::new(settings(100, 1, 500));
        assert_eq!(delayed.on_probe(true), InitStep::InitAfter(Duration::from_millis(500)));
        assert_eq!(delayed.state(), InitState::FoundPendingDelay);
        assert!(!delayed.state().is_terminal());
        assert_eq!(delayed.on_delay_elapsed(), InitStep::InitNow);
        assert_eq!(delayed.on_delay_elapsed(), InitStep::Idle);
        assert_eq!(delayed.state(), InitState::Initialized);
    }

    #[tokio::test]
    async fn missing_anchor_gives_up_after_max_retries() {
        let timer = RecordingTimer::default();
        let probes = Cell::new(0);
        let fired = Cell::new(false);
        let outcome = run_initializer(
            settings(100, 3, 0),
            || {
                probes.set(probes.get() + 1);
                None::<()>
            },
            &timer,
            |()| fired.set(true),
        )
        .await;

        assert_eq!(outcome, InitOutcome::GaveUp { retries: 3 });
        assert_eq!(*timer.sleeps.borrow(), vec![Duration::from_millis(100); 3]);
        assert_eq!(probes.get(), 4);
        assert!(!fired.get());
    }

    #[tokio::test]
    async fn zero_retries_gives_up_after_the_first_probe() {
        let timer = RecordingTimer::default();
        let outcome = run_initializer(settings(100, 0, 0), || None::<()>, &timer, |()| {}).await;
        assert_eq!(outcome, InitOutcome::GaveUp { retries: 0 });
        assert!(timer.sleeps.borrow().is_empty());
    }

    #[tokio::test]
    async fn immediate_anchor_without_delay_inits_in_the_same_turn() {
        let timer = RecordingTimer::default();
        let fired = Cell::new(0);
        let outcome = run_initializer(
            settings(100, 3, 0),
            || Some("anchor"),
            &timer,
            |anchor| {
                assert_eq!(anchor, "anchor");
                fired.set(fired.get() + 1);
            },
        )
        .await;
        assert_eq!(outcome, InitOutcome::Initialized { retries: 0 });
        assert_eq!(fired.get(), 1);
        assert!(timer.sleeps.borrow().is_empty());
    }

    #[tokio::test]
    async fn late_anchor_is_picked_up_by_a_retry() {
        let timer = RecordingTimer::default();
        let probes = Cell::new(0);
        let fired = Cell::new(false);
        let outcome = run_initializer(
            settings(250, 10, 0),
            || {
                probes.set(probes.get() + 1);
                (probes.get() == 3).then_some(())
            },
            &timer,
            |()| fired.set(true),
        )
        .await;
        assert_eq!(outcome, InitOutcome::Initialized { retries: 2 });
        assert_eq!(timer.sleeps.borrow().len(), 2);
        assert!(fired.get());
    }

    #[tokio::test(start_paused = true)]
    async fn init_delay_is_honoured_on_the_tokio_timer() {
        let started = tokio::time::Instant::now();
        let fired_after = Cell::new(None);
        let outcome = run_initializer(
            settings(100, 3, 500),
            || Some(()),
            &TokioTimer,
            |()| fired_after.set(Some(started.elapsed())),
        )
        .await;
        assert_eq!(outcome, InitOutcome::Initialized { retries: 0 });
        let elapsed = fired_after.get().unwrap_or_default();
        assert!(elapsed >= Duration::from_millis(500), "fired after {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn retries_are_spaced_by_the_interval() {
        let started = tokio::time::Instant::now();
        let outcome =
            run_initializer(settings(100, 3, 0), || None::<()>, &TokioTimer, |()| {}).await;
        assert_eq!(outcome, InitOutcome::GaveUp { retries: 3 });
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
