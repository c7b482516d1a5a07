//! Application layer - Use cases and orchestration

pub mod inspect;

pub use inspect::InspectService;
