use crate::foundation::core::{Millis, PlaybackOpts, clamp_index};
use crate::history::store::HistoryStore;
use crate::playback::timer::{TickTimer, TickToken};
use crate::scene::model::{Frame, History};

/// Playback state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// No frames loaded.
    Idle,
    /// Frames loaded, not auto-advancing.
    Ready,
    /// Auto-advancing one frame per tick.
    Playing,
}

/// Cursor and auto-advance state machine over a [`HistoryStore`].
///
/// Time is supplied by the caller (`now` arguments); the controller never sleeps. A tick is
/// pending exactly while the state is [`PlaybackState::Playing`], and every transition that leaves
/// `Playing` or replaces the history cancels it.
///
/// Stepping or scrubbing while playing keeps playing and restarts the tick interval from `now`;
/// landing on the last frame stops playback.
#[derive(Debug)]
pub struct PlaybackController {
    store: HistoryStore,
    index: usize,
    state: PlaybackState,
    timer: TickTimer,
    opts: PlaybackOpts,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackOpts::default())
    }
}

impl PlaybackController {
    /// Create an idle controller.
    pub fn new(opts: PlaybackOpts) -> Self {
        Self {
            store: HistoryStore::new(),
            index: 0,
            state: PlaybackState::Idle,
            timer: TickTimer::new(),
            opts,
        }
    }

    /// Replace the history and rewind to frame 0.
    ///
    /// Any pending tick is cancelled. The state becomes `Ready`, or `Idle` for an empty history.
    pub fn load(&mut self, history: impl Into<History>) {
        if let Some(token) = self.timer.cancel() {
            tracing::debug!(?token, "pending tick cancelled by history replacement");
        }
        let len = self.store.replace(history);
        self.index = 0;
        self.state = if len == 0 {
            PlaybackState::Idle
        } else {
            PlaybackState::Ready
        };
        tracing::debug!(len, state = ?self.state, "playback loaded");
    }

    /// Move one frame back. No-op at frame 0.
    pub fn step_back(&mut self, now: Millis) -> bool {
        let Some(target) = self.index.checked_sub(1) else {
            return false;
        };
        self.move_to(target, now)
    }

    /// Move one frame forward. No-op at the last frame.
    pub fn step_forward(&mut self, now: Millis) -> bool {
        self.move_to(self.index.saturating_add(1), now)
    }

    /// Jump to `index`, clamped into the history. Does not change `Ready`/`Playing`.
    pub fn scrub_to(&mut self, index: usize, now: Millis) -> bool {
        self.move_to(index, now)
    }

    /// Start auto-advancing.
    ///
    /// Only from `Ready` and only when there is a frame after the current one; otherwise nothing
    /// is scheduled and `false` is returned.
    pub fn play(&mut self, now: Millis) -> bool {
        if self.state != PlaybackState::Ready || self.at_end() {
            return false;
        }
        self.state = PlaybackState::Playing;
        self.schedule_from(now);
        tracing::debug!(index = self.index, "playback started");
        true
    }

    /// Stop auto-advancing.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        self.stop();
        tracing::debug!(index = self.index, "playback paused");
        true
    }

    /// `pause` when playing, `play` otherwise.
    pub fn toggle(&mut self, now: Millis) -> bool {
        if self.state == PlaybackState::Playing {
            self.pause()
        } else {
            self.play(now)
        }
    }

    /// Fire every tick due at or before `now`, in order. Returns the number of ticks fired.
    ///
    /// Each tick is due one interval after the previous one was due, so a late call catches up
    /// without drifting.
    pub fn advance(&mut self, now: Millis) -> usize {
        let mut fired = 0;
        while let Some(tick) = self.timer.take_due(now) {
            self.tick(tick.due);
            fired += 1;
        }
        fired
    }

    /// Fire the tick identified by `token` at `now`.
    ///
    /// For hosts that run their own timer queue. A cancelled or superseded token is ignored.
    pub fn fire(&mut self, token: TickToken, now: Millis) -> bool {
        if !self.timer.claim(token) {
            tracing::trace!(?token, "stale tick ignored");
            return false;
        }
        self.tick(now);
        true
    }

    /// Deadline of the pending tick, if playing.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timer.pending().map(|p| p.due)
    }

    /// Token of the pending tick, if playing.
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.timer.pending().map(|p| p.token)
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current index, or `None` when idle.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Idle => None,
            PlaybackState::Ready | PlaybackState::Playing => Some(self.index),
        }
    }

    /// Frame under the cursor, or `None` when idle.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.index().and_then(|i| self.store.get(i).ok())
    }

    /// Number of frames loaded.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Return `true` when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Loaded history.
    pub fn history(&self) -> &History {
        self.store.history()
    }

    /// Playback options.
    pub fn opts(&self) -> PlaybackOpts {
        self.opts
    }

    fn at_end(&self) -> bool {
        self.index + 1 >= self.store.len()
    }

    fn move_to(&mut self, target: usize, now: Millis) -> bool {
        let Some(target) = clamp_index(target, self.store.len()) else {
            return false;
        };
        if target == self.index {
            return false;
        }
        self.index = target;

        if self.state == PlaybackState::Playing {
            if self.at_end() {
                self.stop();
                tracing::debug!(index = self.index, "playback stopped at last frame");
            } else {
                self.schedule_from(now);
            }
        }
        true
    }

    fn tick(&mut self, at: Millis) {
        debug_assert_eq!(self.state, PlaybackState::Playing);
        if let Some(next) = clamp_index(self.index + 1, self.store.len()) {
            self.index = next;
        }
        if self.at_end() {
            self.stop();
            tracing::debug!(index = self.index, "playback reached last frame");
        } else {
            self.schedule_from(at);
        }
    }

    fn schedule_from(&mut self, now: Millis) {
        self.timer.schedule(now.saturating_add(self.opts.tick_interval));
    }

    fn stop(&mut self) {
        self.timer.cancel();
        self.state = PlaybackState::Ready;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
