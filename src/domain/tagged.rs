//! Tag metadata for Rust types
//!
//! Implementing [`Metafeta`] gives a type a store in the process-wide
//! registry. The type's tags are declared once, on first use or on an
//! explicit [`Metafeta::register`] call, and a type naming a supertype
//! starts from a copy of the supertype's tags.
//!
//! ```
//! use metafeta::domain::{Metafeta, Supertype, TagStore};
//! use metafeta::Result;
//!
//! struct Animal;
//!
//! impl Metafeta for Animal {
//!     fn declare_metafeta(store: &mut TagStore) -> Result<()> {
//!         store.tag_attribute(&["colour"], "identifying_features")
//!     }
//! }
//!
//! struct Dog;
//!
//! impl Metafeta for Dog {
//!     fn supertype() -> Option<Supertype> {
//!         Some(Supertype::of::<Animal>())
//!     }
//!
//!     fn declare_metafeta(store: &mut TagStore) -> Result<()> {
//!         store.tag_attribute(&["snout_length"], "identifying_features")
//!     }
//! }
//!
//! assert!(Dog.attribute_tagged_with("colour", "identifying_features"));
//! assert_eq!(
//!     Dog.attributes_for_tag("identifying_features"),
//!     vec!["colour", "snout_length"]
//! );
//! assert_eq!(Animal.attributes_for_tag("identifying_features"), vec!["colour"]);
//! ```

use crate::domain::registry::TypeRegistry;
use crate::domain::store::TagStore;
use crate::domain::tags::Tags;
use crate::error::{MetafetaError, Result};
use std::sync::OnceLock;
use tracing::warn;

static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// The process-wide registry used by [`Metafeta`] types
pub fn registry() -> &'static TypeRegistry {
    REGISTRY.get_or_init(TypeRegistry::new)
}

/// Replace the default process-wide registry, e.g. to attach a loader
///
/// Must run before anything touches [`registry`].
pub fn install_registry(registry: TypeRegistry) -> Result<()> {
    REGISTRY.set(registry).map_err(|_| {
        MetafetaError::Config("The global registry is already initialized".to_string())
    })
}

/// Handle on a supertype, used by [`Metafeta::supertype`]
#[derive(Clone, Copy)]
pub struct Supertype {
    name: fn() -> &'static str,
    register: fn(&TypeRegistry) -> Result<()>,
}

impl Supertype {
    pub fn of<T: Metafeta>() -> Self {
        Supertype {
            name: T::type_key,
            register: register_in::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }
}

impl std::fmt::Debug for Supertype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Supertype").field(&self.name()).finish()
    }
}

/// Attribute tagging for a type
pub trait Metafeta: Sized {
    /// Registry key. Defaults to the full type path.
    fn type_key() -> &'static str {
        std::any::type_name::<Self>()
    }

    fn supertype() -> Option<Supertype> {
        None
    }

    /// Declarative tagging, run once when the type is registered
    fn declare_metafeta(_store: &mut TagStore) -> Result<()> {
        Ok(())
    }

    /// Register the type (and its supertypes) in the global registry
    ///
    /// Registering is idempotent. Query methods register on demand and log
    /// a failing [`Metafeta::declare_metafeta`] instead of returning it.
    fn register() -> Result<()> {
        register_in::<Self>(registry())
    }

    fn metafeta_store() -> TagStore {
        ensure_registered::<Self>();
        registry().store(Self::type_key())
    }

    fn tag_attribute<A: AsRef<str>>(attributes: &[A], tags: impl Into<Tags>) -> Result<()> {
        Self::register()?;
        registry().tag_attribute(Self::type_key(), attributes, tags)
    }

    fn add_metafeta<F>(block: F) -> Result<()>
    where
        F: FnOnce(&mut TagStore) -> Result<()>,
    {
        Self::register()?;
        registry().add_metafeta(Self::type_key(), block)
    }

    fn clear_tag(tag: &str) -> bool {
        ensure_registered::<Self>();
        registry().clear_tag(Self::type_key(), tag)
    }

    fn attributes_for_tag(&self, tag: &str) -> Vec<String> {
        ensure_registered::<Self>();
        registry().attributes_for_tag(Self::type_key(), tag)
    }

    fn attribute_tagged_with(&self, attribute: &str, tag: &str) -> bool {
        ensure_registered::<Self>();
        registry().attribute_tagged_with(Self::type_key(), attribute, tag)
    }
}

/// Register `T` and its supertypes in `registry`
///
/// A supertype whose declaration block failed still has a store, so `T` is
/// declared on top of it and the supertype's error is returned afterwards.
pub fn register_in<T: Metafeta>(registry: &TypeRegistry) -> Result<()> {
    let mut supertype_error = None;
    let parent = match T::supertype() {
        Some(supertype) => {
            if let Err(e) = (supertype.register)(registry) {
                if !registry.is_declared(supertype.name()) {
                    return Err(e);
                }
                warn!(
                    type_name = T::type_key(),
                    supertype = supertype.name(),
                    error = %e,
                    "Supertype declared with errors"
                );
                supertype_error = Some(e);
            }
            Some(supertype.name())
        }
        None => None,
    };

    registry.declare_with(T::type_key(), parent, T::declare_metafeta)?;
    supertype_error.map_or(Ok(()), Err)
}

fn ensure_registered<T: Metafeta>() {
    if let Err(e) = T::register() {
        warn!(type_name = T::type_key(), error = %e, "Failed to register type");
    }
}
