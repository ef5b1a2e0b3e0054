//! Shared run state.
//!
//! A run owns exactly one [`State`]. Every step receives a handle to it and
//! may read or add fields; there is no schema.

pub mod store;

pub use store::State;
