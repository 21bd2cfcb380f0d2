use core::sync::atomic::Ordering;
use crossbeam_epoch::{self as epoch, Atomic, Owned};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PokelangError, Result};
use crate::language::LanguageDefinition;

/// An immutable name -> language table.
pub type LanguageTable = HashMap<String, Arc<LanguageDefinition>>;

/// The process-wide set of loaded languages.
///
/// ## Shadow-Swap
/// Readers never see a table being edited. Every `register` builds a new
/// table from the current one and publishes it with a single atomic swap;
/// `swap_table` replaces the whole set for hot reload. Old tables are
/// reclaimed by `crossbeam-epoch` once no reader holds a guard on them.
pub struct LanguageRegistry {
    table: Atomic<LanguageTable>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            table: Atomic::new(LanguageTable::new()),
        }
    }

    /// Builds a registry from already loaded definitions.
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = LanguageDefinition>,
    {
        let registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Publishes a new language. Names are unique.
    pub fn register(&self, definition: LanguageDefinition) -> Result<Arc<LanguageDefinition>> {
        let definition = Arc::new(definition);
        let guard = epoch::pin();
        loop {
            let current = self.table.load(Ordering::Acquire, &guard);
            // # Safety: the guard keeps `current` alive until it is dropped.
            let mut next = unsafe { current.as_ref() }.cloned().unwrap_or_default();
            if next.contains_key(definition.name()) {
                return Err(PokelangError::DuplicateLanguage(definition.name().to_string()));
            }
            next.insert(definition.name().to_string(), definition.clone());

            match self.table.compare_exchange(
                current,
                Owned::new(next),
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    // # Safety: `current` is unlinked; readers pinned before
                    // the swap keep it alive until their guards drop.
                    unsafe { guard.defer_destroy(current) };
                    tracing::info!("Registered language '{}'", definition.name());
                    return Ok(definition);
                }
                // Lost a race with another writer; rebuild from the new table.
                Err(_) => continue,
            }
        }
    }

    /// Atomically replaces every registered language.
    pub fn swap_table(&self, table: LanguageTable) {
        let guard = epoch::pin();
        let old = self.table.swap(Owned::new(table), Ordering::AcqRel, &guard);
        // # Safety: same reclamation argument as `register`.
        unsafe {
            if !old.is_null() {
                guard.defer_destroy(old);
            }
        }
        tracing::info!("Language table swapped");
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<LanguageDefinition>> {
        self.with_table(|table| table.get(name).cloned())
            .ok_or_else(|| PokelangError::UnknownLanguage(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.with_table(|table| table.contains_key(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.with_table(|table| table.keys().cloned().collect::<Vec<_>>());
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.with_table(|table| table.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current table, e.g. as the base of a reload.
    pub fn snapshot(&self) -> LanguageTable {
        self.with_table(|table| table.clone())
    }

    fn with_table<R>(&self, f: impl FnOnce(&LanguageTable) -> R) -> R {
        let guard = epoch::pin();
        let shared = self.table.load(Ordering::Acquire, &guard);
        // # Safety: Acquire ordering pairs with the AcqRel publish, and the
        // guard prevents reclamation while `f` runs.
        match unsafe { shared.as_ref() } {
            Some(table) => f(table),
            None => f(&LanguageTable::new()),
        }
    }
}

impl Drop for LanguageRegistry {
    fn drop(&mut self) {
        // # Safety: `&mut self` proves no other thread can reach the table.
        unsafe {
            let guard = epoch::unprotected();
            let table = self.table.load(Ordering::Relaxed, guard);
            if !table.is_null() {
                drop(table.into_owned());
            }
        }
    }
}
