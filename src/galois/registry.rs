//! Shared registry of GF(2^m) instances
//!
//! Every distinct (m, primitive polynomial) pair has at most one live set of
//! tables. Handles are reference counted; the registry only holds weak
//! references, so tables are freed when the last matrix referencing them drops.

use super::field::{resolve_polynomial, GaloisField};
use crate::error::GaloisResult;
use log::debug;
use rustc_hash::FxHashMap as HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};

/// Shared, immutable handle to a field's tables
pub type FieldHandle = Arc<GaloisField>;

type FieldKey = (u32, u32);

/// Map-backed registry keyed by (m, primitive polynomial)
#[derive(Default)]
pub struct FieldRegistry {
    fields: Mutex<HashMap<FieldKey, Weak<GaloisField>>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FieldKey, Weak<GaloisField>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the shared field for (m, primpoly), building its tables on first use.
    ///
    /// A `primpoly` of 0 selects the default polynomial for m; both spellings map
    /// to the same instance.
    pub fn acquire(&self, m: u32, primpoly: u32) -> GaloisResult<FieldHandle> {
        let primpoly = resolve_polynomial(m, primpoly)?;
        let key = (m, primpoly);
        let mut fields = self.lock();

        if let Some(field) = fields.get(&key).and_then(Weak::upgrade) {
            debug!(
                "reusing GF(2^{}) [{:#x}], {} handles",
                m,
                primpoly,
                Arc::strong_count(&field)
            );
            return Ok(field);
        }

        let field = Arc::new(GaloisField::new(m, primpoly)?);
        fields.retain(|_, weak| weak.strong_count() > 0);
        fields.insert(key, Arc::downgrade(&field));
        debug!("created GF(2^{}) [{:#x}]", m, primpoly);
        Ok(field)
    }

    /// Give up a handle; the tables are freed once no handle remains
    pub fn release(&self, handle: FieldHandle) {
        let key = (handle.order(), handle.polynomial());
        let last = Arc::strong_count(&handle) == 1;
        drop(handle);

        if last {
            let mut fields = self.lock();
            if fields.get(&key).is_some_and(|weak| weak.strong_count() == 0) {
                fields.remove(&key);
                debug!("released GF(2^{}) [{:#x}]", key.0, key.1);
            }
        }
    }

    /// Number of live handles for a field (0 if it is not currently allocated)
    pub fn ref_count(&self, m: u32, primpoly: u32) -> usize {
        let Ok(primpoly) = resolve_polynomial(m, primpoly) else {
            return 0;
        };
        self.lock()
            .get(&(m, primpoly))
            .map_or(0, |weak| weak.strong_count())
    }

    /// Fields with at least one live handle, as (m, primpoly) pairs
    pub fn live_fields(&self) -> Vec<(u32, u32)> {
        let mut live: Vec<_> = self
            .lock()
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .map(|(key, _)| *key)
            .collect();
        live.sort_unstable();
        live
    }
}

static REGISTRY: OnceLock<FieldRegistry> = OnceLock::new();

/// Process-wide registry
pub fn registry() -> &'static FieldRegistry {
    REGISTRY.get_or_init(FieldRegistry::new)
}

/// Acquire a field from the process-wide registry
pub fn acquire_field(m: u32, primpoly: u32) -> GaloisResult<FieldHandle> {
    registry().acquire(m, primpoly)
}
