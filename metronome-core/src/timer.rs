//! # Tick Chain Timer
//!
//! A repeating timer built from one-shot deadlines. Each tick asks for the
//! next one only after finishing its own work, so ticks never overlap.
//! Cancellation is lazy: `cancel` invalidates the chain token and any tick
//! still in flight is ignored when it arrives.

use std::time::{Duration, Instant};

/// Identifies one run of the chain, from `arm` to `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainToken(u64);

/// A tick the host event loop must deliver back at `deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub token: ChainToken,
    pub deadline: Instant,
}

impl ScheduledTick {
    /// Time left until the tick is due, zero if it is already late.
    pub fn delay_from(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[derive(Debug, Default)]
pub struct TickChain {
    generation: u64,
    live: bool,
    // Ideal time of the most recent tick. Deadlines are measured from here,
    // not from when the tick actually ran, so lateness does not accumulate.
    anchor: Option<Instant>,
}

impl TickChain {
    /// Starts a new chain whose first tick is due at `now`.
    /// Any earlier chain is invalidated.
    pub fn arm(&mut self, now: Instant) -> ChainToken {
        self.generation = self.generation.wrapping_add(1);
        self.live = true;
        self.anchor = Some(now);
        ChainToken(self.generation)
    }

    pub fn cancel(&mut self) {
        self.live = false;
        self.anchor = None;
    }

    pub fn is_live(&self, token: ChainToken) -> bool {
        self.live && token.0 == self.generation
    }

    /// Books the next tick of `token`'s chain one `period` after the previous
    /// ideal tick time. If the chain has fallen a whole period behind it
    /// restarts from `now` instead of firing a burst of catch-up ticks.
    pub fn schedule(&mut self, token: ChainToken, now: Instant, period: Duration) -> Option<ScheduledTick> {
        if !self.is_live(token) {
            return None;
        }
        let anchor = self.anchor.unwrap_or(now);
        let mut deadline = anchor + period;
        if deadline < now {
            tracing::debug!(behind = ?now.duration_since(deadline), "tick chain fell behind, resyncing");
            deadline = now + period;
        }
        self.anchor = Some(deadline);
        Some(ScheduledTick { token, deadline })
    }
}
