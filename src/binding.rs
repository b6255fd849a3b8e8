//! The persisted value: a nullable handle constrained to an interface contract

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::object::{InterfaceContract, InterfaceId, ObjectHandle};

/// Reference field constrained at the type level to objects implementing `I`.
///
/// Holds nothing but the nullable handle; the contract marker is zero-sized
/// and contributes zero bytes of schema. When the handle is set, the object
/// behind it satisfied `I` at commit time — directly, or through exactly one
/// resolved sub-part.
///
/// Mutation funnels through
/// [`AssignmentValidator::assign`](crate::validator::AssignmentValidator::assign)
/// and [`clear`](Self::clear); the conformance invariant is re-checked on
/// every assignment, never assumed from an earlier check.
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct InterfaceBinding<I: InterfaceContract> {
    underlying: Option<ObjectHandle>,
    #[serde(skip)]
    _contract: PhantomData<fn() -> I>,
}

impl<I: InterfaceContract> InterfaceBinding<I> {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self {
            underlying: None,
            _contract: PhantomData,
        }
    }

    /// Handle of the committed instance, if any.
    pub fn get(&self) -> Option<ObjectHandle> {
        self.underlying
    }

    pub fn is_empty(&self) -> bool {
        self.underlying.is_none()
    }

    /// Clearing is always legal; an empty binding trivially satisfies the
    /// contract.
    pub fn clear(&mut self) {
        self.underlying = None;
    }

    /// Interface the binding is constrained to.
    pub fn interface(&self) -> InterfaceId {
        I::id()
    }

    /// Validator-only commit of a resolved handle.
    pub(crate) fn commit(&mut self, handle: ObjectHandle) {
        self.underlying = Some(handle);
    }
}

impl<I: InterfaceContract> Default for InterfaceBinding<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: InterfaceContract> Clone for InterfaceBinding<I> {
    fn clone(&self) -> Self {
        Self {
            underlying: self.underlying,
            _contract: PhantomData,
        }
    }
}

impl<I: InterfaceContract> PartialEq for InterfaceBinding<I> {
    fn eq(&self, other: &Self) -> bool {
        self.underlying == other.underlying
    }
}

impl<I: InterfaceContract> Eq for InterfaceBinding<I> {}

impl<I: InterfaceContract> fmt::Debug for InterfaceBinding<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceBinding<{}>({:?})", I::NAME, self.underlying)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct TelemetrySource;

    impl InterfaceContract for TelemetrySource {
        const NAME: &'static str = "ITelemetrySource";
    }

    #[test]
    fn starts_empty() {
        let binding = InterfaceBinding::<TelemetrySource>::new();
        assert!(binding.is_empty());
        assert_eq!(binding.get(), None);
    }

    #[test]
    fn clear_empties_the_binding() {
        let mut binding = InterfaceBinding::<TelemetrySource>::new();
        binding.commit(ObjectHandle::from_raw(3));
        assert!(!binding.is_empty());

        binding.clear();
        assert!(binding.is_empty());
    }

    #[test]
    fn interface_comes_from_the_contract() {
        let binding = InterfaceBinding::<TelemetrySource>::new();
        assert_eq!(binding.interface().name(), "ITelemetrySource");
    }

    #[test]
    fn serializes_as_just_the_nullable_handle() {
        let mut binding = InterfaceBinding::<TelemetrySource>::new();
        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({"underlying": null})
        );

        binding.commit(ObjectHandle::from_raw(7));
        assert_eq!(
            serde_json::to_value(&binding).unwrap(),
            json!({"underlying": 7})
        );
    }

    #[test]
    fn deserializes_round_trip() {
        let mut binding = InterfaceBinding::<TelemetrySource>::new();
        binding.commit(ObjectHandle::from_raw(11));

        let json = serde_json::to_string(&binding).unwrap();
        let back: InterfaceBinding<TelemetrySource> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, binding);
    }

    #[test]
    fn debug_names_the_contract() {
        let binding = InterfaceBinding::<TelemetrySource>::new();
        assert_eq!(
            format!("{:?}", binding),
            "InterfaceBinding<ITelemetrySource>(None)"
        );
    }
}
