//! Explicit subclass definition.
//!
//! Instead of a hook that fires implicitly when a class is subclassed, a
//! subclass is assembled with a [`SubclassBuilder`] and only comes into
//! existence through [`SubclassBuilder::define`], which runs validation
//! exactly once. On failure no [`ClassDef`] is produced.

use strictabc_core::class::{ClassBuilder, ClassDef, Member, MethodDecl};

use crate::types::ValidationReport;
use crate::validate::validate;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The aggregated, numbered report for the rejected subclass.
    #[error("{0}")]
    Violations(ValidationReport),

    #[error("class '{subclass}' declares parent '{declared}' but was validated against '{given}'")]
    ParentMismatch {
        subclass: String,
        declared: String,
        given: String,
    },
}

impl ContractError {
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ContractError::Violations(r) => Some(r),
            ContractError::ParentMismatch { .. } => None,
        }
    }
}

/// Validate an already-assembled subclass table against its parent.
pub fn check_subclass(parent: &ClassDef, subclass: &ClassDef) -> Result<(), ContractError> {
    if let Some(declared) = &subclass.parent {
        if declared != &parent.name {
            return Err(ContractError::ParentMismatch {
                subclass: subclass.name.clone(),
                declared: declared.clone(),
                given: parent.name.clone(),
            });
        }
    }
    let report = validate(parent, subclass);
    if report.is_empty() {
        Ok(())
    } else {
        Err(ContractError::Violations(report))
    }
}

/// Member registration for a subclass of a known parent.
#[derive(Debug, Clone)]
pub struct SubclassBuilder<'p> {
    parent: &'p ClassDef,
    inner: ClassBuilder,
}

impl<'p> SubclassBuilder<'p> {
    pub fn new(parent: &'p ClassDef, name: impl Into<String>) -> Self {
        Self {
            parent,
            inner: ClassDef::builder(name).parent(parent.name.clone()),
        }
    }

    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.inner = self.inner.at(file, line);
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.inner = self.inner.member(member);
        self
    }

    pub fn method(self, decl: MethodDecl) -> Self {
        self.member(Member::Method(decl))
    }

    /// Declare a restricted-abstract method for this subclass's own children.
    pub fn abstract_method(self, decl: MethodDecl) -> Self {
        self.method(decl.restricted_abstract())
    }

    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.member(Member::Attribute { name: name.into() })
    }

    /// Finish the member table and validate it against the parent.
    pub fn define(self) -> Result<ClassDef, ContractError> {
        let class = self.inner.build();
        check_subclass(self.parent, &class)?;
        tracing::debug!(class = %class.name, parent = %self.parent.name, "subclass defined");
        Ok(class)
    }
}

/// Start a subclass definition from a parent table.
pub trait Derive {
    fn derive(&self, name: impl Into<String>) -> SubclassBuilder<'_>;
}

impl Derive for ClassDef {
    fn derive(&self, name: impl Into<String>) -> SubclassBuilder<'_> {
        SubclassBuilder::new(self, name)
    }
}
