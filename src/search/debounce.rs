//! Trailing-edge debouncer
//!
//! Every pushed value restarts the delay. A timer that wakes up for a value
//! that has since been replaced settles to nothing, so only the latest
//! value that stayed unchanged for the full delay reaches consumers.

use std::future::Future;
use std::time::Duration;

/// Identifies one pushed value; stale tickets settle to `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Replace the pending value and restart the delay
    pub fn push(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Timer for `ticket`; resolves after the full delay.
    ///
    /// Lazy: nothing touches the runtime until the future is polled.
    pub fn timer(&self, ticket: Ticket) -> impl Future<Output = Ticket> + Send + 'static {
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            ticket
        }
    }

    /// Take the pending value if `ticket` is still the latest push
    pub fn settle(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Ticket of the most recent push, for driving timers by hand
    #[cfg(test)]
    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.generation)
    }
}
