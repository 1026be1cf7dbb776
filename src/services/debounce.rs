//! Debounce primitives.
//!
//! [`Debouncer`] is a clock-driven state machine: callers feed it values and
//! the current [`Instant`], and poll it from their event loop. [`DebounceTask`]
//! is the same contract running on tokio, publishing settled values over a
//! `watch` channel.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default quiescence window for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Holds the last settled value and at most one pending replacement.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    current: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            current: initial,
            pending: None,
        }
    }

    /// Schedules `value` to settle `delay` after `now`, superseding any pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Settles the pending value if its deadline has passed.
    ///
    /// Returns the newly committed value once; later polls return `None`
    /// until another value is pushed. A pending value equal to the current
    /// one is absorbed without reporting an update.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        if value == self.current {
            return None;
        }
        self.current = value;
        Some(&self.current)
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Replaces the settled value immediately and drops anything pending.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.current = value;
    }

    pub fn value(&self) -> &T {
        &self.current
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will settle.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the window for later pushes. A pending value keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}

/// A debounced value maintained by a background tokio task.
///
/// Dropping the handle aborts the task, so no update is published after the
/// owner is gone.
pub struct DebounceTask<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    handle: JoinHandle<()>,
}

impl<T> DebounceTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns the debounce loop on the current tokio runtime.
    pub fn spawn(initial: T, delay: Duration) -> Self {
        let (input, mut input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            loop {
                if input_rx.changed().await.is_err() {
                    return;
                }
                // Every change inside the window restarts it.
                loop {
                    match tokio::time::timeout(delay, input_rx.changed()).await {
                        Ok(Ok(())) => continue,
                        Ok(Err(_)) => return,
                        Err(_) => break,
                    }
                }
                let settled = input_rx.borrow_and_update().clone();
                if output_tx.send(settled).is_err() {
                    return;
                }
            }
        });

        Self {
            input,
            output,
            handle,
        }
    }

    /// Feeds a new raw value.
    pub fn set(&self, value: T) {
        self.input.send_replace(value);
    }

    /// A receiver that observes settled values.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    /// The most recently settled value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }
}

impl<T> Drop for DebounceTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
