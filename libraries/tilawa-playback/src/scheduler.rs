//! Deferred controller operations
//!
//! The controller never sleeps. It issues a [`TimerTicket`] to the host's
//! [`Scheduler`], and the host hands the ticket back through
//! `on_timer` once the delay has elapsed. Every reset advances the
//! controller's generation, so a ticket that fires after its operation was
//! cancelled no longer matches and is dropped.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kind of deferred operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Delay before wrapping back to the cycle start
    Wrap,

    /// Zero-delay deferral of the final stop at end of content
    Finalize,

    /// Upper bound on waiting for the host to produce the next track
    AdvanceTimeout,
}

/// Handle for one scheduled operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerTicket {
    pub generation: u64,
    pub kind: TimerKind,
}

/// Host-provided timer facility
pub trait Scheduler {
    /// Deliver `ticket` back to the controller after `delay`
    fn schedule(&mut self, ticket: TimerTicket, delay: Duration);

    /// Best-effort cancellation of a ticket that will be ignored anyway
    fn cancel(&mut self, ticket: TimerTicket) {
        let _ = ticket;
    }
}
