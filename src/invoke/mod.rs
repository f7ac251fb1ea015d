/// Generation-guarded request/complete cycle around the engine.
pub mod boundary;
/// Engine trait and its process, file and closure implementations.
pub mod engine;
/// Failure reporting sinks.
pub mod report;
