use strictabc_core::class::{MethodDecl, ParamDecl};
use strictabc_core::types::{MethodSignature, Parameter, TypeRef};

/// Build the canonical signature of a declared method.
///
/// Undeclared parameter and return types become [`TypeRef::Any`]. Never fails:
/// a descriptor with no parameters yields `name()`.
pub fn extract(decl: &MethodDecl) -> MethodSignature {
    let parameters: Vec<Parameter> = decl.params.iter().map(to_parameter).collect();
    let return_type = decl.returns.clone().unwrap_or_default();
    let rendered = render_signature(&decl.name, decl.receiver.as_deref(), &parameters, &return_type);
    MethodSignature {
        name: decl.name.clone(),
        receiver: decl.receiver.clone(),
        return_type,
        parameters,
        rendered,
    }
}

fn to_parameter(p: &ParamDecl) -> Parameter {
    Parameter {
        name: p.name.clone(),
        declared_type: p.annotation.clone().unwrap_or_default(),
        default: p.default.clone(),
    }
}

/// `name(receiver, a: int, b=1, c: str = 'x') -> Ret`
///
/// `Any` parameters render as their bare name and an `Any` return type drops
/// the arrow, so the text only names types that were actually declared.
pub fn render_signature(
    name: &str,
    receiver: Option<&str>,
    parameters: &[Parameter],
    return_type: &TypeRef,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(parameters.len() + 1);
    if let Some(r) = receiver {
        parts.push(r.to_string());
    }
    for p in parameters {
        let mut part = p.name.clone();
        let typed = !p.declared_type.is_any();
        if typed {
            part.push_str(": ");
            part.push_str(&p.declared_type.to_string());
        }
        if let Some(default) = &p.default {
            part.push_str(if typed { " = " } else { "=" });
            part.push_str(default);
        }
        parts.push(part);
    }

    let mut out = format!("{name}({})", parts.join(", "));
    if !return_type.is_any() {
        out.push_str(" -> ");
        out.push_str(&return_type.to_string());
    }
    out
}
