//! Class member tables and method descriptors.
//!
//! A [`ClassDef`] is the explicit, immutable member table of one class: its
//! name, the name of its immediate parent, and its own declared members in
//! declaration order. Methods carry a [`MethodDecl`] descriptor written by the
//! class author (or produced by a source front end) instead of being
//! discovered by reflection.

use serde::{Deserialize, Serialize};

use crate::typeref::parse_type_lenient;
use crate::types::TypeRef;

/// Marker flags attached to a method descriptor.
///
/// A method is *restricted-abstract* only when both flags are set. Methods
/// that are merely abstract get presence-only treatment elsewhere and are
/// not inspected by the signature validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub is_abstract: bool,
    pub restricted: bool,
}

impl Markers {
    pub const RESTRICTED_ABSTRACT: Markers = Markers {
        is_abstract: true,
        restricted: true,
    };

    pub fn is_restricted_abstract(&self) -> bool {
        self.is_abstract && self.restricted
    }
}

/// Source position of a declaration (1-based line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

/// A formal parameter as declared. `annotation: None` means undeclared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(default)]
    pub annotation: Option<TypeRef>,
    #[serde(default)]
    pub default: Option<String>,
}

/// Declared signature of one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    #[serde(default)]
    pub returns: Option<TypeRef>,
    #[serde(default)]
    pub markers: Markers,
    #[serde(default)]
    pub location: Option<Location>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            params: Vec::new(),
            returns: None,
            markers: Markers::default(),
            location: None,
        }
    }

    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receiver = Some(name.into());
        self
    }

    /// Append a parameter whose type is given as a type expression.
    pub fn param(self, name: impl Into<String>, ty: &str) -> Self {
        self.param_ref(name, parse_type_lenient(ty))
    }

    pub fn param_ref(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation: Some(ty),
            default: None,
        });
        self
    }

    /// Append a parameter without a declared type.
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            annotation: None,
            default: None,
        });
        self
    }

    /// Set the default expression of the most recently added parameter.
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        if let Some(last) = self.params.last_mut() {
            last.default = Some(expr.into());
        }
        self
    }

    pub fn returns(self, ty: &str) -> Self {
        self.returns_ref(parse_type_lenient(ty))
    }

    pub fn returns_ref(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Mark as abstract under restricted validation (sets both markers).
    pub fn restricted_abstract(mut self) -> Self {
        self.markers = Markers::RESTRICTED_ABSTRACT;
        self
    }

    /// Mark as abstract with presence-only semantics.
    pub fn abstract_only(mut self) -> Self {
        self.markers.is_abstract = true;
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.location = Some(Location {
            file: file.into(),
            line,
        });
        self
    }
}

/// One declared class member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Member {
    Method(MethodDecl),
    Attribute { name: String },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Attribute { name } => name,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Member::Method(m) => Some(m),
            Member::Attribute { .. } => None,
        }
    }
}

/// The member table of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl ClassDef {
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            class: ClassDef {
                name: name.into(),
                parent: None,
                members: Vec::new(),
                location: None,
            },
        }
    }

    /// Look up a member declared directly on this class.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Restricted-abstract methods in declaration order.
    pub fn restricted_abstract_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members
            .iter()
            .filter_map(Member::as_method)
            .filter(|m| m.markers.is_restricted_abstract())
    }
}

/// Registration builder for a [`ClassDef`].
///
/// Re-declaring a name replaces the earlier member in place, so a member
/// keeps the position of its first declaration and the value of its last.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    class: ClassDef,
}

impl ClassBuilder {
    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.class.parent = Some(name.into());
        self
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.class.location = Some(Location {
            file: file.into(),
            line,
        });
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.push(member);
        self
    }

    pub fn method(self, decl: MethodDecl) -> Self {
        self.member(Member::Method(decl))
    }

    /// Register a method under restricted abstract validation.
    pub fn abstract_method(self, decl: MethodDecl) -> Self {
        self.method(decl.restricted_abstract())
    }

    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.member(Member::Attribute { name: name.into() })
    }

    pub fn push(&mut self, member: Member) {
        let existing = self
            .class
            .members
            .iter()
            .position(|m| m.name() == member.name());
        match existing {
            Some(idx) => self.class.members[idx] = member,
            None => self.class.members.push(member),
        }
    }

    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn build(self) -> ClassDef {
        self.class
    }
}
