//! Domain models for the trip simulator

pub mod resource;
pub mod state;

// Re-exports
pub use resource::{ResourceDelta, ResourceField};
pub use state::ResourceState;
