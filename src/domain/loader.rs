//! Deferred metadata loading hook

use crate::domain::store::TagStore;
use crate::error::Result;

/// Hook run whenever a type's store is first initialized
///
/// Implementations add externally defined metadata for `type_name` to the
/// freshly initialized store. A missing definition is not an error.
pub trait MetadataLoader: Send + Sync {
    fn load(&self, type_name: &str, store: &mut TagStore) -> Result<()>;
}

/// Loader that never adds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLoader;

impl MetadataLoader for NoopLoader {
    fn load(&self, _type_name: &str, _store: &mut TagStore) -> Result<()> {
        Ok(())
    }
}
