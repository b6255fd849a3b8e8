//! Declared-shape resolution
//!
//! Derives which `(concrete object type, interface contract)` pair a field
//! is constrained to. Exactly two shapes resolve: the binding generic itself
//! (directly, or through one level of base type for the single-argument
//! shorthand) and one level of ordered collection around it. Everything else
//! answers `None` and callers degrade to "no constraint".

use std::sync::Arc;

use crate::error::TetherError;
use crate::interner;
use crate::metadata::{MetadataProvider, TypeDesc, TypeShape};
use crate::object::InterfaceId;

/// The `(concrete object type, interface contract)` pair a field resolves
/// to. Derived from metadata each time it is needed, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintPair {
    pub object_type: Arc<str>,
    pub interface: InterfaceId,
}

/// Extract the constraint pair from a declared field type.
///
/// Purely structural: only the descriptor is inspected, never a runtime
/// value. `None` means the shape is not one this crate resolves.
pub fn resolve(declared: &TypeDesc) -> Option<ConstraintPair> {
    from_binding(declared).or_else(|| from_collection(declared))
}

/// `resolve`, with unresolvable shapes reported as `TETH-010`.
pub fn require(declared: &TypeDesc) -> Result<ConstraintPair, TetherError> {
    resolve(declared).ok_or_else(|| TetherError::UnresolvableFieldShape {
        type_name: declared.name.clone(),
    })
}

/// Resolve the constraint pair for a named field through a metadata provider.
pub fn resolve_field(provider: &dyn MetadataProvider, field: &str) -> Option<ConstraintPair> {
    provider.field_type(field).as_ref().and_then(resolve)
}

fn from_binding(desc: &TypeDesc) -> Option<ConstraintPair> {
    match desc.shape {
        TypeShape::Binding => match desc.args.as_slice() {
            [interface, object] => Some(pair(interface, object)),
            // Single-argument shorthand: the full pair lives on the base
            // type, exactly one inheritance level up.
            [_] => desc.base.as_deref().and_then(from_binding_direct),
            _ => None,
        },
        // A type deriving from the binding shape, one inheritance level.
        _ => desc.base.as_deref().and_then(from_binding_direct),
    }
}

fn from_binding_direct(desc: &TypeDesc) -> Option<ConstraintPair> {
    if desc.shape != TypeShape::Binding {
        return None;
    }
    match desc.args.as_slice() {
        [interface, object] => Some(pair(interface, object)),
        _ => None,
    }
}

fn from_collection(desc: &TypeDesc) -> Option<ConstraintPair> {
    if desc.shape != TypeShape::Collection {
        return None;
    }
    match desc.args.as_slice() {
        // One unwrapping level only: the element must itself be a binding,
        // so a collection-of-collections stays unresolved.
        [element] => from_binding(element),
        _ => None,
    }
}

fn pair(interface: &TypeDesc, object: &TypeDesc) -> ConstraintPair {
    ConstraintPair {
        object_type: interner::intern(&object.name),
        interface: InterfaceId::of(&interface.name),
    }
}
