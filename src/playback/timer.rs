use crate::foundation::core::Millis;

/// Identity of one scheduled tick.
///
/// Tokens are never reused, so a token that outlived its tick can be recognized and ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

/// The tick currently waiting to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTick {
    /// Token of the tick.
    pub token: TickToken,
    /// Clock time at which it becomes due.
    pub due: Millis,
}

/// Single-slot cancellable timer.
///
/// At most one tick is pending. Scheduling replaces (cancels) the pending tick; firing or
/// cancelling empties the slot. Claiming with a stale token does nothing.
#[derive(Debug, Default)]
pub struct TickTimer {
    next_id: u64,
    pending: Option<PendingTick>,
}

impl TickTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a tick at `due`, cancelling any pending one.
    pub fn schedule(&mut self, due: Millis) -> TickToken {
        let token = TickToken(self.next_id);
        self.next_id += 1;
        if let Some(prev) = self.pending.replace(PendingTick { token, due }) {
            tracing::trace!(?prev.token, "tick superseded");
        }
        token
    }

    /// Cancel the pending tick, if any, and return its token.
    pub fn cancel(&mut self) -> Option<TickToken> {
        self.pending.take().map(|p| p.token)
    }

    /// The pending tick, if any.
    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    /// Return `true` when `token` is the pending tick.
    pub fn is_pending(&self, token: TickToken) -> bool {
        self.pending.is_some_and(|p| p.token == token)
    }

    /// Remove and return the pending tick if it is due at `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<PendingTick> {
        match self.pending {
            Some(p) if p.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Remove the pending tick if it matches `token`. Returns `false` for stale tokens.
    pub fn claim(&mut self, token: TickToken) -> bool {
        if self.is_pending(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
