//! Field-type descriptors supplied by the host's metadata provider
//!
//! The host describes a declared field type as a plain value: type name,
//! generic arguments, recognized shape, and at most one level of base type.
//! Resolution over these descriptors is purely structural — no reflection
//! API, no runtime values (see `resolver`).

use serde::{Deserialize, Serialize};

/// Recognized structural shapes of a declared field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// No recognized generic structure.
    #[default]
    Plain,
    /// The interface-binding generic shape.
    Binding,
    /// A homogeneous ordered collection.
    Collection,
}

/// Structural description of a declared field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDesc {
    pub name: String,
    #[serde(default)]
    pub shape: TypeShape,
    #[serde(default)]
    pub args: Vec<TypeDesc>,
    /// Base type, one inheritance level at most. Deeper ancestry is the
    /// host's to flatten; the resolver never walks past it.
    #[serde(default)]
    pub base: Option<Box<TypeDesc>>,
}

impl TypeDesc {
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Plain,
            args: Vec::new(),
            base: None,
        }
    }

    /// Two-argument binding shape: `name<interface, object>`.
    pub fn binding(name: impl Into<String>, interface: TypeDesc, object: TypeDesc) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Binding,
            args: vec![interface, object],
            base: None,
        }
    }

    /// Single-argument binding shorthand: `name<interface>`, resolved
    /// through its base type.
    pub fn binding_shorthand(name: impl Into<String>, interface: TypeDesc) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Binding,
            args: vec![interface],
            base: None,
        }
    }

    /// Ordered collection of `element`.
    pub fn collection(name: impl Into<String>, element: TypeDesc) -> Self {
        Self {
            name: name.into(),
            shape: TypeShape::Collection,
            args: vec![element],
            base: None,
        }
    }

    pub fn with_base(mut self, base: TypeDesc) -> Self {
        self.base = Some(Box::new(base));
        self
    }
}

/// Host seam describing declared field types.
pub trait MetadataProvider {
    /// Descriptor for a field's declared type; `None` if the field is
    /// unknown to the host.
    fn field_type(&self, field: &str) -> Option<TypeDesc>;
}
