//! Logical one-shot timers driving retransmission and keep-alive.
//!
//! The actual passage of time is someone else's problem: an embedding
//! application wires a [`TimerDriver`] to whatever scheduler it runs (an RTOS
//! tick, an async runtime's sleep, a hardware timer interrupt) and calls
//! [`crate::session::Session::on_timer`] when a timer it armed fires. This
//! module only tracks *which* logical timer is currently armed, enforcing that
//! at most one retransmission timer is active at a time (invariant 2 of the
//! engine: only the queue head is ever being retried).

#![allow(missing_docs)]

use crate::limits::{TIMEOUT_CONNECT_SECS, TIMEOUT_SECS, TIMEOUT_SUBSCRIBE_SECS};

/// Which logical timer a firing or arm request refers to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimerId {
    Connect,
    Register,
    Subscribe,
    Ping,
}

/// A duration in whole seconds; the engine never needs sub-second resolution.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Seconds(pub u32);

impl TimerId {
    /// The retransmission timeout associated with this timer, for timers that
    /// have a fixed one (`Ping`'s period is the session's configured
    /// keep-alive interval instead, supplied by the caller).
    pub fn default_timeout(self) -> Option<Seconds> {
        match self {
            TimerId::Connect => Some(Seconds(TIMEOUT_CONNECT_SECS)),
            TimerId::Register => Some(Seconds(TIMEOUT_SECS)),
            TimerId::Subscribe => Some(Seconds(TIMEOUT_SUBSCRIBE_SECS)),
            TimerId::Ping => None,
        }
    }
}

/// Bridges this crate's logical timers to a concrete scheduler.
///
/// Implementations are expected to be thin: arm a single hardware/OS timer,
/// and report back which [`TimerId`] fired by calling
/// [`crate::session::Session::on_timer`] from the scheduler's own event loop.
pub trait TimerDriver {
    /// Arm `which` to fire once after `duration`, replacing any previous arming
    /// of the same timer.
    fn arm(&mut self, which: TimerId, duration: Seconds);

    /// Cancel `which` if armed. A no-op if it is not.
    fn cancel(&mut self, which: TimerId);
}

/// Tracks which retransmission timer is currently armed, so callers (and
/// tests) can assert the single-timer invariant without a real driver.
#[derive(Debug, Default)]
pub struct ArmedTimers {
    retransmit: Option<TimerId>,
    ping: bool,
}

impl ArmedTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `which` is now the armed retransmission timer. `Ping` does
    /// not participate in the mutual-exclusion tracked here: it runs
    /// independently of whatever retransmission is in flight.
    pub fn set_retransmit(&mut self, which: TimerId) {
        debug_assert_ne!(which, TimerId::Ping, "ping timer is tracked separately");
        self.retransmit = Some(which);
    }

    /// Clear the tracked retransmission timer.
    pub fn clear_retransmit(&mut self) {
        self.retransmit = None;
    }

    /// The currently tracked retransmission timer, if any.
    pub fn retransmit(&self) -> Option<TimerId> {
        self.retransmit
    }

    pub fn set_ping_armed(&mut self, armed: bool) {
        self.ping = armed;
    }

    pub fn ping_armed(&self) -> bool {
        self.ping
    }
}
