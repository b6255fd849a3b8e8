//! Object model seam: handles, interface identities, the stored-object contract
//!
//! Everything the core knows about host objects passes through the types
//! here. Conformance is a metadata question answered by the host
//! ([`StoredObject::implements`]), never a downcast.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::interner;

/// Opaque, stable identity of a persisted object.
///
/// A handle is a weak reference: the object behind it is owned by the store
/// and may be destroyed independently, after which
/// [`ObjectStore::load_at`](crate::store::ObjectStore::load_at) answers `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interned interface name.
///
/// Comparison takes the pointer-equality fast path when both sides came out
/// of the global interner.
#[derive(Debug, Clone, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InterfaceId(Arc<str>);

impl InterfaceId {
    /// Intern an interface name.
    pub fn of(name: &str) -> Self {
        Self(interner::intern(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for InterfaceId {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InterfaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for InterfaceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(InterfaceId::of(&name))
    }
}

/// Marker trait tying a binding to an interface contract at the type level.
///
/// The constraint is a compile-time fact: nothing about it is stored next to
/// the handle. `NAME` must match what the host's objects answer in
/// [`StoredObject::implements`].
pub trait InterfaceContract: 'static {
    const NAME: &'static str;

    fn id() -> InterfaceId {
        InterfaceId::of(Self::NAME)
    }
}

/// Host-object contract consumed by validation and candidate enumeration.
pub trait StoredObject: Send + Sync {
    /// Display name of the object.
    fn name(&self) -> &str;

    /// Runtime type name, the key [`ObjectStore::find_by_type`](crate::store::ObjectStore::find_by_type)
    /// indexes by.
    fn type_name(&self) -> &str;

    /// Whether the object's runtime type implements the interface.
    fn implements(&self, interface: &InterfaceId) -> bool;

    /// Handles of attached sub-parts. Non-empty marks the object as a
    /// composite; composites are resolved through their parts, never
    /// directly.
    fn parts(&self) -> Vec<ObjectHandle> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl InterfaceContract for Probe {
        const NAME: &'static str = "IProbe";
    }

    #[test]
    fn handle_roundtrips_raw_value() {
        let h = ObjectHandle::from_raw(7);
        assert_eq!(h.raw(), 7);
        assert_eq!(h.to_string(), "#7");
    }

    #[test]
    fn handle_serializes_transparently() {
        let h = ObjectHandle::from_raw(12);
        assert_eq!(serde_json::to_value(h).unwrap(), serde_json::json!(12));

        let back: ObjectHandle = serde_json::from_value(serde_json::json!(12)).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn interface_id_equality_by_content() {
        assert_eq!(InterfaceId::of("IProbe"), InterfaceId::of("IProbe"));
        assert_ne!(InterfaceId::of("IProbe"), InterfaceId::of("ISensor"));
    }

    #[test]
    fn contract_id_uses_const_name() {
        assert_eq!(Probe::id().name(), "IProbe");
        assert_eq!(Probe::id(), InterfaceId::of("IProbe"));
    }

    #[test]
    fn interface_id_deserializes_interned() {
        let id: InterfaceId = serde_json::from_value(serde_json::json!("IProbe")).unwrap();
        assert_eq!(id, InterfaceId::of("IProbe"));
    }
}
