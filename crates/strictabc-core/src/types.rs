use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A declared type, or the `Any` sentinel for undeclared ones.
///
/// Equality is structural: two references are equal when their canonical
/// names and argument trees match. Aliases are folded at parse time, so
/// `typing.Dict[Text, Text]` and `Dict[str, str]` are the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TypeRef {
    #[default]
    Any,
    Named { name: String, args: Vec<TypeRef> },
    /// Bracketed argument list, e.g. the `[int, str]` in `Callable[[int, str], bool]`.
    List(Vec<TypeRef>),
}

impl TypeRef {
    /// A plain named type without arguments.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A generic type such as `Dict[str, str]`.
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            args,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TypeRef::Any)
    }

    pub(crate) fn is_none(&self) -> bool {
        matches!(self, TypeRef::Named { name, args } if name == "None" && args.is_empty())
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[TypeRef]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Any => f.write_str("Any"),
            TypeRef::List(items) => {
                f.write_str("[")?;
                write_args(f, items)?;
                f.write_str("]")
            }
            TypeRef::Named { name, args } if args.is_empty() => f.write_str(name),
            TypeRef::Named { name, args } => {
                // Union[X, None] is shown the way it is usually written.
                if name == "Union" && args.len() == 2 && args[1].is_none() {
                    return write!(f, "Optional[{}]", args[0]);
                }
                write!(f, "{name}[")?;
                write_args(f, args)?;
                f.write_str("]")
            }
        }
    }
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        // Opaque annotations are written out verbatim and must read back.
        Ok(crate::typeref::parse_type_lenient(&text))
    }
}

/// One formal parameter of a canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: TypeRef,
    /// Default expression as written. Rendered, never compared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default: None,
        }
    }
}

/// Canonical signature of one method.
///
/// `rendered` is for display and diffing only. Comparison goes through
/// `return_type` and `parameters`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    /// Implicit receiver (`self`, `cls`). Compared by presence and name, but
    /// kept out of `parameters` so positions start after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    pub return_type: TypeRef,
    pub parameters: Vec<Parameter>,
    pub rendered: String,
}

impl MethodSignature {
    /// Structural equality: receiver, return type and ordered `(name, type)` pairs.
    pub fn same_shape(&self, other: &MethodSignature) -> bool {
        self.receiver == other.receiver
            && self.return_type == other.return_type
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.name == b.name && a.declared_type == b.declared_type)
    }
}
