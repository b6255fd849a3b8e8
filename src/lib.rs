//! Tether - interface-constrained references to persisted objects
//!
//! A serialized field can be tethered to an interface contract rather than a
//! concrete type: the field stores nothing but a nullable handle, assignment
//! narrows any proposed object down to the instance actually satisfying the
//! contract (a composite resolves through its sub-parts), and a filtered
//! candidate picker proposes exactly the persisted instances that qualify.

pub mod binding;
pub mod candidates;
pub mod diagnostics;
pub mod error;
pub mod interner;
pub mod metadata;
pub mod object;
pub mod resolver;
pub mod selection;
pub mod store;
pub mod style;
pub mod validator;

pub use binding::InterfaceBinding;
pub use candidates::{CandidateEntry, CandidateIndex, CandidateList, IconRef};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticsSink, TracingSink};
pub use error::{FixSuggestion, TetherError};
pub use metadata::{MetadataProvider, TypeDesc, TypeShape};
pub use object::{InterfaceContract, InterfaceId, ObjectHandle, StoredObject};
pub use resolver::ConstraintPair;
pub use selection::{
    ChoiceCallback, PresentationSurface, SelectionController, SelectionOutcome, SelectionState,
};
pub use store::{MemoryStore, ObjectRecord, ObjectStore};
pub use style::PresentationStyle;
pub use validator::{AssignmentValidator, ResolvedInstance};
