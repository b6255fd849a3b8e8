//! Persisted-object store seam and an in-memory reference implementation
//!
//! The core never owns objects; it queries the host's store through
//! [`ObjectStore`] and keeps nothing but handles. [`MemoryStore`] is the
//! reference implementation used by hosts without their own asset database
//! and by the test suites. Uses DashMap for lock-free concurrent access.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use crate::interner;
use crate::object::{InterfaceId, ObjectHandle, StoredObject};

/// Read-only query surface over the host's persisted objects.
///
/// Safe to call repeatedly; nothing in this crate mutates the store.
pub trait ObjectStore: Send + Sync {
    /// All handles whose stored type matches `type_name`, in discovery order.
    fn find_by_type(&self, type_name: &str) -> Vec<ObjectHandle>;

    /// Load the object behind a handle. `None` for destroyed or unknown
    /// handles.
    fn load_at(&self, handle: ObjectHandle) -> Option<Arc<dyn StoredObject>>;
}

/// Plain stored-object value for hosts without their own object model.
///
/// A record with at least one part is a composite; assignment then resolves
/// through the parts rather than the record itself.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    name: Arc<str>,
    type_name: Arc<str>,
    interfaces: FxHashSet<InterfaceId>,
    parts: Vec<ObjectHandle>,
}

impl ObjectRecord {
    pub fn new(name: impl AsRef<str>, type_name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            type_name: interner::intern(type_name.as_ref()),
            interfaces: FxHashSet::default(),
            parts: Vec::new(),
        }
    }

    /// Declare that this object's runtime type implements `interface`.
    pub fn with_interface(mut self, interface: InterfaceId) -> Self {
        self.interfaces.insert(interface);
        self
    }

    /// Attach a sub-part, turning the record into a composite.
    pub fn with_part(mut self, part: ObjectHandle) -> Self {
        self.parts.push(part);
        self
    }
}

impl StoredObject for ObjectRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn implements(&self, interface: &InterfaceId) -> bool {
        self.interfaces.contains(interface)
    }

    fn parts(&self) -> Vec<ObjectHandle> {
        self.parts.clone()
    }
}

/// In-memory object store.
///
/// Lookup is lock-free (DashMap); discovery order is the insertion order.
/// Handles are never reused, so a removed object leaves its old handles
/// dangling exactly like a destroyed asset would.
#[derive(Default)]
pub struct MemoryStore {
    objects: DashMap<ObjectHandle, Arc<dyn StoredObject>>,
    order: RwLock<Vec<ObjectHandle>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, returning its new handle.
    pub fn insert(&self, object: impl StoredObject + 'static) -> ObjectHandle {
        let handle = ObjectHandle::from_raw(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.objects.insert(handle, Arc::new(object));
        self.order.write().push(handle);
        handle
    }

    /// Destroy an object. Existing handles to it go dangling.
    pub fn remove(&self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn find_by_type(&self, type_name: &str) -> Vec<ObjectHandle> {
        self.order
            .read()
            .iter()
            .copied()
            .filter(|handle| {
                self.objects
                    .get(handle)
                    .map(|object| object.type_name() == type_name)
                    .unwrap_or(false)
            })
            .collect()
    }

    fn load_at(&self, handle: ObjectHandle) -> Option<Arc<dyn StoredObject>> {
        self.objects.get(&handle).map(|object| Arc::clone(object.value()))
    }
}
