use crate::foundation::error::{VizError, VizResult};
use crate::invoke::engine::EngineHandle;
use crate::invoke::report::FailureReporter;
use crate::playback::controller::PlaybackController;
use crate::scene::model::History;

/// Sequence number of one request. Later requests have larger generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What a successful engine run produced.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineOutput {
    /// A decoded frame array (possibly empty).
    Frames(History),
    /// The engine wrote nothing.
    Nothing,
}

/// Request that has been accepted but not yet run.
///
/// Running it needs only the engine handle, so it can be moved to a worker thread while the
/// caller keeps the boundary and the player.
#[derive(Clone, Debug)]
pub struct PendingInvocation {
    generation: Generation,
    raw_input: String,
}

impl PendingInvocation {
    /// Generation assigned by [`InvocationBoundary::request`].
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Input text as submitted.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Call the engine and decode its output.
    #[tracing::instrument(skip_all, fields(generation = self.generation.0))]
    pub fn run(self, engine: &EngineHandle) -> Completion {
        let output = engine.run(&self.raw_input).and_then(|text| {
            if text.trim().is_empty() {
                Ok(EngineOutput::Nothing)
            } else {
                History::from_json(&text).map(EngineOutput::Frames)
            }
        });
        Completion {
            generation: self.generation,
            output,
        }
    }
}

/// Result of running a [`PendingInvocation`], waiting to be applied.
#[derive(Debug)]
pub struct Completion {
    generation: Generation,
    output: VizResult<EngineOutput>,
}

impl Completion {
    /// Generation of the request this completes.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Decoded output or the failure.
    pub fn output(&self) -> &VizResult<EngineOutput> {
        &self.output
    }
}

/// How a completion was handled.
#[derive(Debug)]
pub enum InvokeOutcome {
    /// The history was replaced with `frames` frames.
    Applied {
        /// Length of the new history.
        frames: usize,
    },
    /// A newer request was issued first; the result was dropped.
    Stale,
    /// The engine produced no output. The history is unchanged.
    Empty,
    /// The engine failed. The history is unchanged.
    Failed(VizError),
}

impl InvokeOutcome {
    /// Return `true` when the history was replaced.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Serializes engine invocations against one player.
///
/// Every request gets a new generation and only the completion of the latest generation is
/// applied. Completions of earlier requests are discarded, so results never arrive out of order.
/// On failure or empty output the previous history stays loaded and the reporter is told.
#[derive(Debug)]
pub struct InvocationBoundary {
    engine: EngineHandle,
    latest: Generation,
    generating: bool,
}

impl InvocationBoundary {
    /// Wrap an initialized engine.
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            latest: Generation::default(),
            generating: false,
        }
    }

    /// Engine handle, for running pending invocations.
    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Return `true` while the latest request has not completed.
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Generation of the most recent request.
    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Accept a new request. Pauses playback and supersedes every earlier request.
    pub fn request(
        &mut self,
        raw_input: impl Into<String>,
        player: &mut PlaybackController,
    ) -> PendingInvocation {
        self.latest = Generation(self.latest.0 + 1);
        self.generating = true;
        if player.pause() {
            tracing::debug!("playback paused for new request");
        }
        tracing::debug!(generation = self.latest.0, "invocation requested");
        PendingInvocation {
            generation: self.latest,
            raw_input: raw_input.into(),
        }
    }

    /// Apply a completion to `player`.
    pub fn complete(
        &mut self,
        completion: Completion,
        player: &mut PlaybackController,
        reporter: &mut dyn FailureReporter,
    ) -> InvokeOutcome {
        if completion.generation != self.latest {
            tracing::debug!(
                generation = completion.generation.0,
                latest = self.latest.0,
                "stale completion discarded"
            );
            return InvokeOutcome::Stale;
        }
        self.generating = false;

        match completion.output {
            Ok(EngineOutput::Frames(history)) => {
                let frames = history.len();
                player.load(history);
                tracing::info!(frames, "history applied");
                InvokeOutcome::Applied { frames }
            }
            Ok(EngineOutput::Nothing) => {
                reporter.report(&VizError::engine("engine returned no output"));
                InvokeOutcome::Empty
            }
            Err(err) => {
                reporter.report(&err);
                InvokeOutcome::Failed(err)
            }
        }
    }

    /// Request, run and complete in one call.
    pub fn invoke(
        &mut self,
        raw_input: impl Into<String>,
        player: &mut PlaybackController,
        reporter: &mut dyn FailureReporter,
    ) -> InvokeOutcome {
        let pending = self.request(raw_input, player);
        let completion = pending.run(&self.engine);
        self.complete(completion, player, reporter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/invoke/boundary.rs"]
mod tests;
