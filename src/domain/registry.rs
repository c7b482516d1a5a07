//! Type registry
//!
//! Holds one tag store slot per declared type, keyed by type name. Root types
//! get an empty store when declared. Subtypes start without a local store and
//! copy their supertype's store the first time it is read or written; from
//! then on the two evolve independently.
//!
//! Each slot has its own lock, so registrations against one type serialize
//! while other types stay untouched. Initializing a subtype locks the child
//! slot before the parent slot, never the other way round.
//!
//! Declaration blocks and the loader run while their type's slot is locked.
//! A thread that reaches the same type again from inside one of them gets an
//! `InvalidArgument` error (or an empty query result) instead of waiting on
//! its own lock.

use crate::domain::loader::{MetadataLoader, NoopLoader};
use crate::domain::store::TagStore;
use crate::domain::tags::Tags;
use crate::error::{MetafetaError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, warn};

struct TypeSlot {
    parent: Option<String>,
    store: Mutex<Option<TagStore>>,
}

impl TypeSlot {
    fn new(parent: Option<String>) -> Self {
        TypeSlot {
            parent,
            store: Mutex::new(None),
        }
    }
}

thread_local! {
    /// `(registry address, type name)` pairs whose slot this thread holds
    static BUSY: RefCell<HashSet<(usize, String)>> = RefCell::new(HashSet::new());
}

/// Marks a type's slot as held by the current thread until dropped
struct BusyGuard {
    key: (usize, String),
}

impl BusyGuard {
    fn enter(registry: &TypeRegistry, name: &str) -> Result<Self> {
        let key = (registry as *const TypeRegistry as usize, name.to_string());
        let entered = BUSY.with(|busy| busy.borrow_mut().insert(key.clone()));
        if !entered {
            return Err(MetafetaError::InvalidArgument(format!(
                "Type '{}' is still being declared",
                name
            )));
        }
        Ok(BusyGuard { key })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let _ = BUSY.try_with(|busy| busy.borrow_mut().remove(&self.key));
    }
}

/// Registry of per-type tag stores
pub struct TypeRegistry {
    types: RwLock<HashMap<String, Arc<TypeSlot>>>,
    loader: Box<dyn MetadataLoader>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types())
            .finish_non_exhaustive()
    }
}

impl TypeRegistry {
    /// Create a registry that loads no external metadata
    pub fn new() -> Self {
        Self::with_loader(NoopLoader)
    }

    /// Create a registry that runs `loader` whenever a store is initialized
    pub fn with_loader(loader: impl MetadataLoader + 'static) -> Self {
        TypeRegistry {
            types: RwLock::new(HashMap::new()),
            loader: Box::new(loader),
        }
    }

    /// Declare a root type with an empty store
    ///
    /// Returns `false` if the type was already declared, in which case
    /// nothing changes.
    pub fn declare(&self, type_name: &str) -> Result<bool> {
        self.declare_with(type_name, None, |_| Ok(()))
    }

    /// Declare a type and run `init` on its store before anyone else sees it
    ///
    /// With a `parent`, the store starts as a copy of the parent's store.
    /// If `init` fails the type stays declared with its initial store and
    /// the error is returned. Already declared types are left alone.
    ///
    /// Calling back into the same type from `init` fails with
    /// `InvalidArgument`.
    pub fn declare_with<F>(&self, type_name: &str, parent: Option<&str>, init: F) -> Result<bool>
    where
        F: FnOnce(&mut TagStore) -> Result<()>,
    {
        let name = validate_type_name(type_name)?;
        let parent = parent.map(validate_type_name).transpose()?;
        if let Some(parent) = parent {
            check_not_self(name, parent)?;
            self.declare(parent)?;
        }

        let _busy = BusyGuard::enter(self, name)?;

        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = types.get(name) {
            return match parent {
                Some(parent) => check_same_parent(name, existing, parent),
                None => Ok(false),
            };
        }
        let slot = Arc::new(TypeSlot::new(parent.map(str::to_string)));
        types.insert(name.to_string(), Arc::clone(&slot));
        let mut guard = slot.store.lock().unwrap_or_else(PoisonError::into_inner);
        drop(types);

        debug!(type_name = name, supertype = parent, "Declared type");
        let initial = self.initial_store(name, parent);
        let mut working = initial.clone();
        match init(&mut working) {
            Ok(()) => {
                *guard = Some(working);
                Ok(true)
            }
            Err(e) => {
                *guard = Some(initial);
                Err(e)
            }
        }
    }

    /// Declare `type_name` as a subtype of `parent`
    ///
    /// The parent is declared as a root type if it is unknown. The subtype's
    /// store is left uninitialized until first access. Re-declaring with the
    /// same parent returns `false`; with a different parent it fails.
    pub fn declare_subtype(&self, type_name: &str, parent: &str) -> Result<bool> {
        let name = validate_type_name(type_name)?;
        let parent = validate_type_name(parent)?;
        check_not_self(name, parent)?;

        self.declare(parent)?;

        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = types.get(name) {
            return check_same_parent(name, existing, parent);
        }
        types.insert(
            name.to_string(),
            Arc::new(TypeSlot::new(Some(parent.to_string()))),
        );

        debug!(type_name = name, supertype = parent, "Declared subtype");
        Ok(true)
    }

    pub fn is_declared(&self, type_name: &str) -> bool {
        self.slot(type_name).is_some()
    }

    /// Direct supertype of `type_name`, if any
    pub fn parent_of(&self, type_name: &str) -> Option<String> {
        self.slot(type_name).and_then(|slot| slot.parent.clone())
    }

    /// Names of all declared types, sorted
    pub fn types(&self) -> Vec<String> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Tag attributes of `type_name`, declaring it as a root type if unknown
    pub fn tag_attribute<A: AsRef<str>>(
        &self,
        type_name: &str,
        attributes: &[A],
        tags: impl Into<Tags>,
    ) -> Result<()> {
        let tags = tags.into();
        self.with_store_mut(type_name, |store| store.tag_attribute(attributes, tags))
    }

    /// Run a block of registrations against the store of `type_name`
    ///
    /// The block works on a copy that replaces the store only when the block
    /// succeeds, so a failing block leaves the type untouched.
    pub fn add_metafeta<F>(&self, type_name: &str, block: F) -> Result<()>
    where
        F: FnOnce(&mut TagStore) -> Result<()>,
    {
        self.with_store_mut(type_name, |store| {
            let mut working = store.clone();
            block(&mut working)?;
            *store = working;
            Ok(())
        })
    }

    /// Drop a tag from the store of `type_name`
    ///
    /// Inherited tags are copied into the subtype's store first, so the
    /// supertype keeps its own copy. Unknown types and tags are a no-op.
    pub fn clear_tag(&self, type_name: &str, tag: &str) -> bool {
        let Some(slot) = self.slot(type_name) else {
            return false;
        };
        self.with_slot(type_name.trim(), &slot, |store| store.clear_tag(tag))
            .unwrap_or_else(|e| {
                warn!(type_name, error = %e, "Tag not cleared");
                false
            })
    }

    /// Attributes of `type_name` tagged with `tag`
    pub fn attributes_for_tag(&self, type_name: &str, tag: &str) -> Vec<String> {
        self.with_store(type_name, |store| store.attributes_for_tag(tag).to_vec())
            .unwrap_or_default()
    }

    /// Whether `attribute` of `type_name` is tagged with `tag`
    pub fn attribute_tagged_with(&self, type_name: &str, attribute: &str, tag: &str) -> bool {
        self.with_store(type_name, |store| store.attribute_tagged_with(attribute, tag))
            .unwrap_or(false)
    }

    /// Snapshot of the store of `type_name`; empty for unknown types
    pub fn store(&self, type_name: &str) -> TagStore {
        self.with_store(type_name, TagStore::clone)
            .unwrap_or_default()
    }

    /// Whether `type_name` already has a local store
    ///
    /// A type whose declaration is still running on this thread is not.
    pub fn is_initialized(&self, type_name: &str) -> bool {
        let Some(slot) = self.slot(type_name) else {
            return false;
        };
        let Ok(_busy) = BusyGuard::enter(self, type_name.trim()) else {
            return false;
        };
        let initialized = slot
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        initialized
    }

    fn slot(&self, type_name: &str) -> Option<Arc<TypeSlot>> {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        types.get(type_name.trim()).cloned()
    }

    fn with_store<R>(&self, type_name: &str, f: impl FnOnce(&TagStore) -> R) -> Option<R> {
        let slot = self.slot(type_name)?;
        match self.with_slot(type_name.trim(), &slot, |store| f(store)) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(type_name, error = %e, "Answering query with an empty store");
                None
            }
        }
    }

    /// Unknown types are declared as root types first
    fn with_store_mut<R>(
        &self,
        type_name: &str,
        f: impl FnOnce(&mut TagStore) -> Result<R>,
    ) -> Result<R> {
        let name = validate_type_name(type_name)?;
        let slot = match self.slot(name) {
            Some(slot) => slot,
            None => {
                self.declare(name)?;
                self.slot(name).ok_or_else(|| {
                    MetafetaError::InvalidArgument(format!("Type '{}' is not declared", name))
                })?
            }
        };
        self.with_slot(name, &slot, f)?
    }

    fn with_slot<R>(
        &self,
        name: &str,
        slot: &TypeSlot,
        f: impl FnOnce(&mut TagStore) -> R,
    ) -> Result<R> {
        let _busy = BusyGuard::enter(self, name)?;
        let mut guard = slot.store.lock().unwrap_or_else(PoisonError::into_inner);
        let store = guard.get_or_insert_with(|| self.initial_store(name, slot.parent.as_deref()));
        Ok(f(store))
    }

    fn initial_store(&self, name: &str, parent: Option<&str>) -> TagStore {
        let store = match parent {
            Some(parent) => {
                let inherited = self.store(parent);
                debug!(
                    type_name = name,
                    supertype = parent,
                    tags = inherited.len(),
                    "Copied store from supertype"
                );
                inherited
            }
            None => TagStore::new(),
        };

        let mut loaded = store.clone();
        match self.loader.load(name, &mut loaded) {
            Ok(()) => loaded,
            Err(e) => {
                warn!(type_name = name, error = %e, "Skipping deferred metadata");
                store
            }
        }
    }
}

fn check_not_self(name: &str, parent: &str) -> Result<()> {
    if name == parent {
        return Err(MetafetaError::InvalidArgument(format!(
            "Type '{}' cannot extend itself",
            name
        )));
    }
    Ok(())
}

fn check_same_parent(name: &str, existing: &TypeSlot, parent: &str) -> Result<bool> {
    match existing.parent.as_deref() {
        Some(current) if current == parent => Ok(false),
        Some(current) => Err(MetafetaError::InvalidArgument(format!(
            "Type '{}' already extends '{}'",
            name, current
        ))),
        None => Err(MetafetaError::InvalidArgument(format!(
            "Type '{}' is already declared without a supertype",
            name
        ))),
    }
}

fn validate_type_name(type_name: &str) -> Result<&str> {
    let name = type_name.trim();
    if name.is_empty() {
        return Err(MetafetaError::InvalidArgument(
            "Blank type name".to_string(),
        ));
    }
    Ok(name)
}
