//! Assignment validation and container-to-part narrowing
//!
//! Every mutation of a binding funnels through [`AssignmentValidator::assign`].
//! Conformance is re-checked on each call; a rejected assignment never leaves
//! a stale or partially-valid reference behind.

use std::sync::Arc;

use crate::binding::InterfaceBinding;
use crate::diagnostics::{DiagnosticKind, DiagnosticsSink};
use crate::error::TetherError;
use crate::object::{InterfaceContract, InterfaceId, ObjectHandle, StoredObject};
use crate::store::ObjectStore;

/// Concrete object or sub-part ultimately stored in a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstance {
    pub handle: ObjectHandle,
    /// Name of the sub-part the proposal was narrowed to, if any.
    pub part_name: Option<Arc<str>>,
}

/// Validates proposed assignments against an interface contract.
pub struct AssignmentValidator<'a> {
    store: &'a dyn ObjectStore,
    sink: &'a dyn DiagnosticsSink,
}

impl<'a> AssignmentValidator<'a> {
    pub fn new(store: &'a dyn ObjectStore, sink: &'a dyn DiagnosticsSink) -> Self {
        Self { store, sink }
    }

    /// Resolve the instance actually satisfying `interface` for a proposal.
    ///
    /// Pure: no binding is touched and no diagnostic is reported. A
    /// composite resolves through its sub-parts, and exactly one must
    /// conform; a leaf must implement the interface itself.
    pub fn resolve_instance(
        &self,
        proposed: ObjectHandle,
        interface: &InterfaceId,
    ) -> Result<ResolvedInstance, TetherError> {
        let object = self
            .store
            .load_at(proposed)
            .ok_or(TetherError::DanglingReference {
                handle: proposed.raw(),
            })?;

        let parts = object.parts();
        if !parts.is_empty() {
            return self.narrow_to_part(&*object, &parts, interface);
        }

        if object.implements(interface) {
            return Ok(ResolvedInstance {
                handle: proposed,
                part_name: None,
            });
        }

        Err(TetherError::InterfaceNotImplemented {
            interface: interface.name().to_string(),
            object: object.name().to_string(),
        })
    }

    /// The commit path.
    ///
    /// `None` always commits null: clearing is legal. On success the binding
    /// holds the resolved instance, which may differ in identity from the
    /// proposal (container narrowed to a sub-part). On rejection the binding
    /// is forced to null, exactly one diagnostic goes to the sink, and the
    /// reason comes back as `Err` — advisory, never escalated further.
    pub fn assign<I: InterfaceContract>(
        &self,
        binding: &mut InterfaceBinding<I>,
        proposed: Option<ObjectHandle>,
    ) -> Result<Option<ResolvedInstance>, TetherError> {
        let Some(handle) = proposed else {
            binding.clear();
            return Ok(None);
        };

        match self.resolve_instance(handle, &I::id()) {
            Ok(resolved) => {
                binding.commit(resolved.handle);
                Ok(Some(resolved))
            }
            Err(err) => {
                binding.clear();
                if let Some(kind) = rejection_diagnostic(&err) {
                    self.sink.report(kind);
                }
                Err(err)
            }
        }
    }

    fn narrow_to_part(
        &self,
        container: &dyn StoredObject,
        parts: &[ObjectHandle],
        interface: &InterfaceId,
    ) -> Result<ResolvedInstance, TetherError> {
        let mut conforming: Vec<(ObjectHandle, Arc<str>)> = Vec::new();
        for &part in parts {
            // a destroyed part cannot conform
            if let Some(object) = self.store.load_at(part) {
                if object.implements(interface) {
                    conforming.push((part, Arc::from(object.name())));
                }
            }
        }

        match conforming.len() {
            0 => Err(TetherError::NoConformingPart {
                interface: interface.name().to_string(),
                object: container.name().to_string(),
            }),
            1 => {
                let (handle, part_name) = conforming.remove(0);
                Ok(ResolvedInstance {
                    handle,
                    part_name: Some(part_name),
                })
            }
            n => Err(TetherError::AmbiguousPart {
                interface: interface.name().to_string(),
                object: container.name().to_string(),
                conforming: n,
            }),
        }
    }
}

/// Diagnostic event for a validator rejection; other errors have none.
pub(crate) fn rejection_diagnostic(err: &TetherError) -> Option<DiagnosticKind> {
    match err {
        TetherError::InterfaceNotImplemented { interface, object } => {
            Some(DiagnosticKind::InterfaceNotImplemented {
                interface: interface.clone(),
                object: object.clone(),
            })
        }
        TetherError::NoConformingPart { interface, object } => {
            Some(DiagnosticKind::NoConformingPart {
                interface: interface.clone(),
                object: object.clone(),
            })
        }
        TetherError::AmbiguousPart {
            interface,
            object,
            conforming,
        } => Some(DiagnosticKind::AmbiguousPart {
            interface: interface.clone(),
            object: object.clone(),
            conforming: *conforming,
        }),
        TetherError::DanglingReference { handle } => {
            Some(DiagnosticKind::DanglingReference { handle: *handle })
        }
        _ => None,
    }
}
