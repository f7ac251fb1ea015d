//! `stepviz` replays algorithm executions frame by frame.
//!
//! An external engine turns a configuration string into a history: an ordered array of frames,
//! each holding a caption and a set of typed data-structure snapshots. This crate decodes that
//! history, validates every object against the type registry, projects frames into a display
//! model, and drives a cursor over the history with step, scrub and timed auto-play.
//!
//! The pieces, bottom up:
//! - [`scene::model`]: [`Frame`], [`Object`] and the immutable [`History`].
//! - [`schema`]: the [`TypeTag`] registry and whole-history checks.
//! - [`render`]: pure projection ([`project_frame`]) and renderers ([`create_renderer`]).
//! - [`history::store`] and [`playback`]: the [`PlaybackController`] state machine.
//! - [`invoke`]: the [`InvocationBoundary`] between user input and the engine.
#![forbid(unsafe_code)]

mod foundation;

pub mod history;
pub mod invoke;
pub mod playback;
pub mod render;
pub mod scene;
pub mod schema;

pub use foundation::core::{Millis, PlaybackOpts, TICK_INTERVAL, clamp_index};
pub use foundation::error::{VizError, VizResult};
pub use history::store::HistoryStore;
pub use invoke::boundary::{
    Completion, EngineOutput, Generation, InvocationBoundary, InvokeOutcome, PendingInvocation,
};
pub use invoke::engine::{CommandEngine, CommandEngineOpts, Engine, EngineHandle, FileEngine, FnEngine};
pub use invoke::report::{CollectingReporter, FailureReporter, LogReporter};
pub use playback::controller::{PlaybackController, PlaybackState};
pub use playback::timer::{PendingTick, TickTimer, TickToken};
pub use render::backend::{FrameRenderer, JsonRenderer, OutputFormat, create_renderer, render_frame};
pub use render::project::{project_frame, project_object};
pub use render::text::TextRenderer;
pub use render::view::{Caption, Cell, EntryView, FrameView, ObjectView, ViewBody};
pub use scene::model::{Frame, HighlightState, Highlights, History, Object, Objects};
pub use schema::registry::{Shape, Strategy, TypeTag};
pub use schema::validate::{CheckReport, SchemaError, SchemaErrors, check_history};
