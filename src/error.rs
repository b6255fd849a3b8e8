//! Error types with fix suggestions
//!
//! Every recognized failure in this crate degrades to "binding left empty";
//! there is no fatal class. Variant messages carry stable TETH-0xx codes so
//! hosts can match on them without parsing prose.

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TetherError {
    // ─────────────────────────────────────────────────────────────
    // Shape resolution (TETH-010 to TETH-019)
    // ─────────────────────────────────────────────────────────────

    #[error("TETH-010: Field type '{type_name}' has no resolvable interface constraint")]
    UnresolvableFieldShape { type_name: String },

    // ─────────────────────────────────────────────────────────────
    // Assignment validation (TETH-020 to TETH-029)
    // ─────────────────────────────────────────────────────────────

    #[error("TETH-020: Object '{object}' does not implement required interface '{interface}'")]
    InterfaceNotImplemented { interface: String, object: String },

    #[error("TETH-021: Object '{object}' has no part that implements '{interface}'")]
    NoConformingPart { interface: String, object: String },

    #[error(
        "TETH-022: Object '{object}' has {conforming} parts that implement '{interface}'; assignment is ambiguous"
    )]
    AmbiguousPart {
        interface: String,
        object: String,
        conforming: usize,
    },

    #[error("TETH-023: Handle #{handle} no longer resolves to a stored object")]
    DanglingReference { handle: u64 },

    // ─────────────────────────────────────────────────────────────
    // Selection transactions (TETH-030 to TETH-039)
    // ─────────────────────────────────────────────────────────────

    #[error("TETH-030: A selection is already awaiting a choice for this field")]
    SelectionInProgress,

    #[error("TETH-031: No selection transaction is open")]
    NoOpenSelection,
}

impl FixSuggestion for TetherError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            TetherError::UnresolvableFieldShape { .. } => {
                Some("Declare the field as Binding<I, T> or one ordered collection of them")
            }
            TetherError::InterfaceNotImplemented { .. } => {
                Some("Assign an object whose runtime type implements the interface")
            }
            TetherError::NoConformingPart { .. } => {
                Some("Attach a part that implements the interface before assigning the object")
            }
            TetherError::AmbiguousPart { .. } => {
                Some("Assign the conforming part directly instead of its container")
            }
            TetherError::DanglingReference { .. } => {
                Some("Refresh the candidate list; the object was removed from the store")
            }
            TetherError::SelectionInProgress => {
                Some("Resolve or cancel the open picker before starting another selection")
            }
            TetherError::NoOpenSelection => {
                Some("Call begin_selection before reporting a choice")
            }
        }
    }
}
