//! Playback state machine and its cancellable tick timer.

/// Cursor and play/pause/step/scrub state machine.
pub mod controller;
/// Single-slot cancellable timer.
pub mod timer;
