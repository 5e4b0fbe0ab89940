use strictabc_core::types::MethodSignature;

use crate::types::Discrepancy;

/// Find the first structural difference between `expected` and `actual`.
///
/// Checks run in a fixed order and stop at the first failure:
/// return type, parameter count, receiver name, then per position name
/// before type. Default expressions and rendered text are not compared.
///
/// A receiver present on one side only is an arity mismatch, and its
/// counts then include the receiver. Otherwise counts and positions are
/// taken after the receiver.
pub fn compare(expected: &MethodSignature, actual: &MethodSignature) -> Option<Discrepancy> {
    if expected.return_type != actual.return_type {
        return Some(Discrepancy::ReturnType {
            expected: expected.return_type.clone(),
            actual: actual.return_type.clone(),
        });
    }

    if expected.receiver.is_some() != actual.receiver.is_some() {
        return Some(Discrepancy::Arity {
            expected: formal_count(expected),
            actual: formal_count(actual),
        });
    }

    if expected.parameters.len() != actual.parameters.len() {
        return Some(Discrepancy::Arity {
            expected: expected.parameters.len(),
            actual: actual.parameters.len(),
        });
    }

    if let (Some(want), Some(got)) = (&expected.receiver, &actual.receiver) {
        if want != got {
            return Some(Discrepancy::ReceiverName {
                expected: want.clone(),
                actual: got.clone(),
            });
        }
    }

    for (position, (want, got)) in expected
        .parameters
        .iter()
        .zip(&actual.parameters)
        .enumerate()
    {
        if want.name != got.name {
            return Some(Discrepancy::ParameterName {
                position,
                expected: want.name.clone(),
                actual: got.name.clone(),
            });
        }
        if want.declared_type != got.declared_type {
            return Some(Discrepancy::ParameterType {
                position,
                name: want.name.clone(),
                expected: want.declared_type.clone(),
                actual: got.declared_type.clone(),
            });
        }
    }

    None
}

fn formal_count(sig: &MethodSignature) -> usize {
    sig.parameters.len() + usize::from(sig.receiver.is_some())
}
