//! Process-wide presentation defaults, computed once
//!
//! The picker button glyph, inline hint markers and list labels the host
//! renders next to binding fields. Immutable after first use; set
//! `TETHER_ASCII_MARKERS=1` before that to stay in plain ASCII (checked
//! once).

use once_cell::sync::Lazy;

static STYLE: Lazy<PresentationStyle> = Lazy::new(PresentationStyle::detect);

/// Immutable presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationStyle {
    /// Width reserved for the picker button, in host layout units.
    pub select_button_width: u16,
    /// Glyph on the picker button.
    pub select_button_glyph: &'static str,
    /// Marker shown inline while a binding holds a value.
    pub filled_marker: &'static str,
    /// Row label rendered when an enumeration finds nothing.
    pub no_results_label: &'static str,
    group_label_prefix: &'static str,
}

impl PresentationStyle {
    pub const SELECT_BUTTON_WIDTH: u16 = 20;

    fn detect() -> Self {
        let ascii = std::env::var("TETHER_ASCII_MARKERS")
            .map(|v| v == "1")
            .unwrap_or(false);
        Self {
            select_button_width: Self::SELECT_BUTTON_WIDTH,
            select_button_glyph: if ascii { "o" } else { "\u{2299}" },
            filled_marker: "*",
            no_results_label: "No valid objects found",
            group_label_prefix: "Select ",
        }
    }

    /// Header of the candidate tree for a base type.
    pub fn group_label(&self, base_type: &str) -> String {
        format!("{}{}", self.group_label_prefix, base_type)
    }

    /// Inline hint next to a binding field: the interface name while the
    /// field is empty or hovered, the filled marker otherwise.
    pub fn interface_hint(&self, interface: &str, bound: bool, hovering: bool) -> String {
        if !bound || hovering {
            format!("({interface})")
        } else {
            self.filled_marker.to_string()
        }
    }
}

/// The process-wide style, initialized on first use.
pub fn active() -> &'static PresentationStyle {
    &STYLE
}
