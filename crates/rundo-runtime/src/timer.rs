#![forbid(unsafe_code)]

//! Restartable single-shot debounce timer.
//!
//! [`CoalescingTimer`] holds at most one pending deadline. It never sleeps
//! and never spawns anything: the owner drives it by calling
//! [`poll_at`](CoalescingTimer::poll_at) from its event loop, and can ask
//! [`time_remaining`](CoalescingTimer::time_remaining) how long to wait
//! before the next poll.
//!
//! ```text
//! edit    edit  edit
//!  │       │     │
//!  ▼       ▼     ▼
//!  ├──100ms──┤                 (first deadline, superseded)
//!          ├──100ms──┤         (superseded)
//!                ├──100ms──┤
//!                          ▲
//!                          fires once
//! ```
//!
//! # Invariants
//!
//! - At most one firing is pending.
//! - Every start bumps the generation; a firing is delivered with the token
//!   of the start that scheduled it, so a superseded firing can never be
//!   observed.
//! - A firing is delivered at most once.

use web_time::{Duration, Instant};

/// Identifies one scheduled firing of a [`CoalescingTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    deadline: Instant,
}

/// Debounce primitive: a cancelable one-shot deadline.
#[derive(Debug, Clone, Default)]
pub struct CoalescingTimer {
    pending: Option<Pending>,
    generation: u64,
}

impl CoalescingTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a firing `delay` after `now`.
    ///
    /// Any firing still pending is superseded.
    pub fn start_at(&mut self, now: Instant, delay: Duration) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TimerToken(self.generation);
        let deadline = now + delay;
        if let Some(previous) = self.pending.replace(Pending { token, deadline }) {
            tracing::trace!(
                superseded = previous.token.0,
                generation = token.0,
                "debounce timer superseded"
            );
        }
        tracing::trace!(generation = token.0, delay_ms = delay.as_millis() as u64, "debounce timer started");
        token
    }

    /// Cancel the pending firing (if any) and schedule a new one.
    pub fn restart_at(&mut self, now: Instant, delay: Duration) -> TimerToken {
        self.cancel();
        self.start_at(now, delay)
    }

    /// Drop the pending firing. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                tracing::trace!(generation = pending.token.0, "debounce timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Fire the pending firing immediately, regardless of its deadline.
    pub fn expire(&mut self) -> Option<TimerToken> {
        let pending = self.pending.take()?;
        tracing::trace!(generation = pending.token.0, "debounce timer expired early");
        Some(pending.token)
    }

    /// Deliver the pending firing if its deadline has passed.
    pub fn poll_at(&mut self, now: Instant) -> Option<TimerToken> {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                tracing::trace!(generation = pending.token.0, "debounce timer fired");
                Some(pending.token)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Token of the pending firing, if any.
    #[must_use]
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    /// Time left until the pending firing; zero once overdue.
    #[must_use]
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|p| p.deadline.checked_duration_since(now).unwrap_or(Duration::ZERO))
    }
}
