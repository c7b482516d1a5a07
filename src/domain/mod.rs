//! Domain layer - Tag stores and the type registry

pub mod loader;
pub mod registry;
pub mod store;
pub mod tagged;
pub mod tags;

pub use loader::{MetadataLoader, NoopLoader};
pub use registry::TypeRegistry;
pub use store::TagStore;
pub use tagged::{install_registry, register_in, registry, Metafeta, Supertype};
pub use tags::Tags;
