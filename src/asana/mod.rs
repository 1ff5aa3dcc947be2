//! Asana task source: REST client and notes sanitization.

pub mod client;
pub mod notes;

pub use client::AsanaClient;
