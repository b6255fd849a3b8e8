//! Selection transactions: candidates, host surface, validated choice
//!
//! One transaction per field at a time. The host presents the candidate
//! list and later reports the user's pick; the parked continuation fires at
//! most once, with a freshly validated instance. Stale or double-fired host
//! callbacks find no pending transaction and are refused.

use crate::candidates::{CandidateEntry, CandidateIndex, CandidateList};
use crate::diagnostics::DiagnosticsSink;
use crate::error::TetherError;
use crate::object::{InterfaceId, ObjectHandle};
use crate::store::ObjectStore;
use crate::validator::{rejection_diagnostic, AssignmentValidator, ResolvedInstance};

/// Host side of the picker: receives the candidate tree, later reports the
/// user's choice back through [`SelectionController::resolve_choice`].
pub trait PresentationSurface {
    fn present(&self, candidates: &CandidateList);
}

/// Where a selection transaction currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingChoice,
}

/// How a transaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The choice validated; the continuation has fired with this instance.
    Committed(ResolvedInstance),
    /// Picker dismissed, sentinel chosen, or nothing picked. Not an error.
    Cancelled,
}

/// Single-shot continuation invoked with the validated choice.
pub type ChoiceCallback = Box<dyn FnOnce(ResolvedInstance)>;

struct PendingChoice {
    interfaces: Vec<InterfaceId>,
    on_chosen: ChoiceCallback,
}

/// Orchestrates one selection transaction per field.
///
/// State machine: `Idle → AwaitingChoice → {Committing | Cancelled} → Idle`,
/// with exactly one pending continuation. A binding is never the target of
/// two concurrently open transactions.
pub struct SelectionController<'a> {
    store: &'a dyn ObjectStore,
    sink: &'a dyn DiagnosticsSink,
    pending: Option<PendingChoice>,
}

impl<'a> SelectionController<'a> {
    pub fn new(store: &'a dyn ObjectStore, sink: &'a dyn DiagnosticsSink) -> Self {
        Self {
            store,
            sink,
            pending: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        if self.pending.is_some() {
            SelectionState::AwaitingChoice
        } else {
            SelectionState::Idle
        }
    }

    /// Open the transaction: enumerate candidates, hand them to the
    /// surface, park `on_chosen` until the host reports back.
    pub fn begin_selection(
        &mut self,
        surface: &dyn PresentationSurface,
        base_type: &str,
        interfaces: &[InterfaceId],
        on_chosen: ChoiceCallback,
    ) -> Result<(), TetherError> {
        if self.pending.is_some() {
            return Err(TetherError::SelectionInProgress);
        }

        let list = CandidateIndex::new(self.store).enumerate(base_type, interfaces);
        surface.present(&list);
        self.pending = Some(PendingChoice {
            interfaces: interfaces.to_vec(),
            on_chosen,
        });
        Ok(())
    }

    /// Host reports the user's pick; `None` or the sentinel is a dismissal.
    ///
    /// The chosen handle is re-validated against the transaction's
    /// interface set before the continuation fires — conformance is never
    /// assumed from the earlier filtering. A validation failure drops the
    /// continuation, surfaces one diagnostic, and returns the reason; the
    /// cancelled and failed paths both leave any binding untouched.
    pub fn resolve_choice(
        &mut self,
        chosen: Option<&CandidateEntry>,
    ) -> Result<SelectionOutcome, TetherError> {
        let pending = self.pending.take().ok_or(TetherError::NoOpenSelection)?;

        let Some(handle) = chosen.and_then(|entry| entry.handle) else {
            return Ok(SelectionOutcome::Cancelled);
        };

        match self.validate_against_set(handle, &pending.interfaces) {
            Ok(resolved) => {
                (pending.on_chosen)(resolved.clone());
                Ok(SelectionOutcome::Committed(resolved))
            }
            Err(err) => {
                if let Some(kind) = rejection_diagnostic(&err) {
                    self.sink.report(kind);
                }
                Err(err)
            }
        }
    }

    /// First interface the instance satisfies wins; an empty set accepts
    /// any instance that still loads.
    fn validate_against_set(
        &self,
        handle: ObjectHandle,
        interfaces: &[InterfaceId],
    ) -> Result<ResolvedInstance, TetherError> {
        if interfaces.is_empty() {
            return match self.store.load_at(handle) {
                Some(_) => Ok(ResolvedInstance {
                    handle,
                    part_name: None,
                }),
                None => Err(TetherError::DanglingReference {
                    handle: handle.raw(),
                }),
            };
        }

        let validator = AssignmentValidator::new(self.store, self.sink);
        let mut outcome = validator.resolve_instance(handle, &interfaces[0]);
        for interface in &interfaces[1..] {
            if outcome.is_ok() {
                break;
            }
            outcome = validator.resolve_instance(handle, interface);
        }
        outcome
    }
}
