//! Structured diagnostics for rejection and narrowing-failure events
//!
//! Advisory only: nothing here blocks further interaction.
//! - `DiagnosticKind`: tagged event payloads (interface + offending object)
//! - `Diagnostic`: envelope with id + timestamp
//! - `DiagnosticLog`: thread-safe, append-only log; doubles as a recording
//!   sink in tests

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Rejection and narrowing-failure events surfaced to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A proposed leaf object's runtime type does not implement the
    /// interface.
    InterfaceNotImplemented { interface: String, object: String },
    /// A proposed composite has no sub-part implementing the interface.
    NoConformingPart { interface: String, object: String },
    /// More than one sub-part conforms; the assignment is ambiguous.
    AmbiguousPart {
        interface: String,
        object: String,
        conforming: usize,
    },
    /// The proposed handle no longer loads from the store.
    DanglingReference { handle: u64 },
}

impl DiagnosticKind {
    /// Interface name the event is about, when one is involved.
    pub fn interface(&self) -> Option<&str> {
        match self {
            Self::InterfaceNotImplemented { interface, .. }
            | Self::NoConformingPart { interface, .. }
            | Self::AmbiguousPart { interface, .. } => Some(interface),
            Self::DanglingReference { .. } => None,
        }
    }

    /// Offending object name, when one could be loaded.
    pub fn object(&self) -> Option<&str> {
        match self {
            Self::InterfaceNotImplemented { object, .. }
            | Self::NoConformingPart { object, .. }
            | Self::AmbiguousPart { object, .. } => Some(object),
            Self::DanglingReference { .. } => None,
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InterfaceNotImplemented { interface, object } => write!(
                f,
                "Assigned object '{object}' does not implement required interface '{interface}'"
            ),
            Self::NoConformingPart { interface, object } => write!(
                f,
                "Object '{object}' does not have a part that implements '{interface}'"
            ),
            Self::AmbiguousPart {
                interface,
                object,
                conforming,
            } => write!(
                f,
                "Object '{object}' has {conforming} parts that implement '{interface}'"
            ),
            Self::DanglingReference { handle } => {
                write!(f, "Handle #{handle} no longer resolves to a stored object")
            }
        }
    }
}

/// Single reported event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Monotonic sequence ID (for ordering)
    pub id: u64,
    /// Time since log creation (ms)
    pub timestamp_ms: u64,
    pub kind: DiagnosticKind,
}

/// Receiver of validation warnings.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, kind: DiagnosticKind);
}

/// Sink that forwards to `tracing::warn!` and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, kind: DiagnosticKind) {
        warn_kind(&kind);
    }
}

fn warn_kind(kind: &DiagnosticKind) {
    warn!(
        interface = kind.interface().unwrap_or(""),
        object = kind.object().unwrap_or(""),
        "{kind}"
    );
}

/// Thread-safe, append-only log of diagnostics.
#[derive(Clone)]
pub struct DiagnosticLog {
    events: Arc<RwLock<Vec<Diagnostic>>>,
    start_time: Instant,
    next_id: Arc<AtomicU64>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            start_time: Instant::now(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Append an event (thread-safe, returns event ID)
    pub fn emit(&self, kind: DiagnosticKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = Diagnostic {
            id,
            timestamp_ms: self.start_time.elapsed().as_millis() as u64,
            kind,
        };

        self.events.write().push(event);
        id
    }

    /// Get all events (cloned)
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.read().clone()
    }

    /// Filter events by interface name
    pub fn filter_interface(&self, interface: &str) -> Vec<Diagnostic> {
        self.events()
            .into_iter()
            .filter(|e| e.kind.interface() == Some(interface))
            .collect()
    }

    /// Serialize to JSON for persistence/debugging
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.events()).unwrap_or(Value::Null)
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DiagnosticLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticLog")
            .field("len", &self.len())
            .finish()
    }
}

impl DiagnosticsSink for DiagnosticLog {
    fn report(&self, kind: DiagnosticKind) {
        warn_kind(&kind);
        self.emit(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn not_implemented() -> DiagnosticKind {
        DiagnosticKind::InterfaceNotImplemented {
            interface: "ITelemetrySource".into(),
            object: "thermostat".into(),
        }
    }

    #[test]
    fn kind_exposes_interface_and_object() {
        let kind = not_implemented();
        assert_eq!(kind.interface(), Some("ITelemetrySource"));
        assert_eq!(kind.object(), Some("thermostat"));

        let dangling = DiagnosticKind::DanglingReference { handle: 4 };
        assert_eq!(dangling.interface(), None);
        assert_eq!(dangling.object(), None);
    }

    #[test]
    fn kind_serializes_with_type_tag() {
        let json = serde_json::to_value(not_implemented()).unwrap();
        assert_eq!(json["type"], "interface_not_implemented");
        assert_eq!(json["interface"], "ITelemetrySource");
        assert_eq!(json["object"], "thermostat");
    }

    #[test]
    fn kind_deserializes_from_tagged_json() {
        let json = json!({
            "type": "no_conforming_part",
            "interface": "IProbe",
            "object": "rig"
        });

        let kind: DiagnosticKind = serde_json::from_value(json).unwrap();
        assert_eq!(
            kind,
            DiagnosticKind::NoConformingPart {
                interface: "IProbe".into(),
                object: "rig".into(),
            }
        );
    }

    #[test]
    fn display_names_interface_and_object() {
        assert_eq!(
            not_implemented().to_string(),
            "Assigned object 'thermostat' does not implement required interface 'ITelemetrySource'"
        );
    }

    #[test]
    fn log_starts_empty() {
        let log = DiagnosticLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn emit_returns_monotonic_ids() {
        let log = DiagnosticLog::new();

        let id1 = log.emit(not_implemented());
        let id2 = log.emit(DiagnosticKind::DanglingReference { handle: 1 });
        let id3 = log.emit(not_implemented());

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(id3, 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn filter_interface_returns_only_matching() {
        let log = DiagnosticLog::new();
        log.emit(not_implemented());
        log.emit(DiagnosticKind::NoConformingPart {
            interface: "IProbe".into(),
            object: "rig".into(),
        });
        log.emit(DiagnosticKind::DanglingReference { handle: 2 });

        let telemetry = log.filter_interface("ITelemetrySource");
        assert_eq!(telemetry.len(), 1);

        let probe = log.filter_interface("IProbe");
        assert_eq!(probe.len(), 1);
    }

    #[test]
    fn to_json_is_an_array_of_tagged_events() {
        let log = DiagnosticLog::new();
        log.emit(not_implemented());

        let json = log.to_json();
        assert!(json.is_array());
        assert_eq!(json[0]["kind"]["type"], "interface_not_implemented");
    }

    #[test]
    fn report_records_the_event() {
        let log = DiagnosticLog::new();
        log.report(not_implemented());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn clones_share_the_same_log() {
        let log = DiagnosticLog::new();
        log.emit(not_implemented());

        let cloned = log.clone();
        assert_eq!(cloned.len(), 1);

        log.emit(DiagnosticKind::DanglingReference { handle: 3 });
        assert_eq!(cloned.len(), 2);
    }

    #[test]
    fn concurrent_emits_keep_unique_ids() {
        use std::thread;

        let log = DiagnosticLog::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let log = log.clone();
                thread::spawn(move || log.emit(DiagnosticKind::DanglingReference { handle: i }))
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(log.len(), 10);

        let mut ids: Vec<u64> = log.events().iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
