/// Single-owner storage for the current history.
pub mod store;
