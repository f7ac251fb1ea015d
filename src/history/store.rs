use crate::foundation::error::{VizError, VizResult};
use crate::scene::model::{Frame, History};

/// Holder of the current [`History`].
///
/// `replace` swaps the whole history in one assignment; readers holding an earlier
/// [`History`] handle keep seeing the old frames, never a mix.
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    history: History,
}

impl HistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `history`, discarding the previous one. Returns the new length.
    pub fn replace(&mut self, history: impl Into<History>) -> usize {
        self.history = history.into();
        tracing::debug!(frames = self.history.len(), "history replaced");
        self.history.len()
    }

    /// Frame at `index`.
    ///
    /// Callers clamp first; an out-of-range index is a bug, reported as
    /// [`VizError::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> VizResult<&Frame> {
        self.history.get(index).ok_or(VizError::IndexOutOfRange {
            index,
            len: self.history.len(),
        })
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Return `true` when no history is loaded or it has no frames.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Shared handle to the current history.
    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/store.rs"]
mod tests;
