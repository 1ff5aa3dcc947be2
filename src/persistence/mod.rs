//! Local persistence for task↔message correlation state.

pub mod state_store;

pub use state_store::StateStore;
