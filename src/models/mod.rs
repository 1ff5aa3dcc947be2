//! Domain models shared across the source, sink, and reconciler.

pub mod task;

pub use task::{TaskDetails, TaskSnapshot};
