//! Candidate enumeration and filtering over the persisted-object store
//!
//! Read-only query: which existing instances of a base type could a binding
//! with a given interface set legally hold? The result is fresh per call and
//! the presentation layer always gets at least one row to render.

use std::sync::Arc;

use crate::interner;
use crate::object::{InterfaceId, ObjectHandle, StoredObject};
use crate::store::ObjectStore;
use crate::style;

/// Icon identifier derived from an object's runtime type. Resolving it to
/// pixels is the presentation layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRef(Arc<str>);

impl IconRef {
    pub fn for_type(type_name: &str) -> Self {
        Self(interner::intern(type_name))
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

/// One selectable row. `handle: None` marks the "no results" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub label: String,
    pub icon: Option<IconRef>,
    pub handle: Option<ObjectHandle>,
}

impl CandidateEntry {
    pub fn is_sentinel(&self) -> bool {
        self.handle.is_none()
    }
}

/// Tree-shaped candidate list handed to the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    pub group_label: String,
    pub entries: Vec<CandidateEntry>,
}

/// Read-only query over existing persisted instances of a base type.
pub struct CandidateIndex<'a> {
    store: &'a dyn ObjectStore,
}

impl<'a> CandidateIndex<'a> {
    pub fn new(store: &'a dyn ObjectStore) -> Self {
        Self { store }
    }

    /// All instances of `base_type` satisfying at least one of `interfaces`
    /// (an empty set keeps every instance), in store discovery order.
    ///
    /// A run with zero matches still yields one sentinel row so the
    /// presentation layer always has something to render. Re-invoke to
    /// refresh; nothing is cached.
    pub fn enumerate(&self, base_type: &str, interfaces: &[InterfaceId]) -> CandidateList {
        let style = style::active();
        let mut entries = Vec::new();

        for handle in self.store.find_by_type(base_type) {
            // index entries can outlive their objects; skip what no longer loads
            let Some(object) = self.store.load_at(handle) else {
                continue;
            };

            let qualifies =
                interfaces.is_empty() || interfaces.iter().any(|i| object.implements(i));
            if !qualifies {
                continue;
            }

            entries.push(CandidateEntry {
                label: object.name().to_string(),
                icon: Some(IconRef::for_type(object.type_name())),
                handle: Some(handle),
            });
        }

        if entries.is_empty() {
            entries.push(CandidateEntry {
                label: style.no_results_label.to_string(),
                icon: None,
                handle: None,
            });
        }

        CandidateList {
            group_label: style.group_label(base_type),
            entries,
        }
    }
}
