use xxhash_rust::xxh64::xxh64;

use crate::types::MethodSignature;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const HASH_WIDTH: usize = 11;

/// Encode a u64 as a zero-padded base62 string.
fn base62_encode(mut value: u64) -> String {
    let mut digits = [b'0'; HASH_WIDTH];
    let mut idx = HASH_WIDTH;
    while value > 0 && idx > 0 {
        idx -= 1;
        digits[idx] = BASE62_CHARS[(value % 62) as usize];
        value /= 62;
    }
    digits.iter().map(|&b| b as char).collect()
}

/// Canonical text of a signature's comparable shape.
///
/// Covers name, receiver, ordered `(name, type)` pairs and return type.
/// Default expressions are excluded, so two signatures that compare equal
/// always share a shape string.
pub fn canonical_shape(sig: &MethodSignature) -> String {
    let mut out = String::with_capacity(sig.rendered.len());
    out.push_str(&sig.name);
    out.push('(');
    let mut first = true;
    if let Some(receiver) = &sig.receiver {
        out.push_str(receiver);
        first = false;
    }
    for p in &sig.parameters {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&p.name);
        out.push(':');
        out.push_str(&p.declared_type.to_string());
    }
    out.push_str(")->");
    out.push_str(&sig.return_type.to_string());
    out
}

/// Shape hash = base62(xxhash64(canonical_shape)).
///
/// Stable across runs and platforms; used to identify signatures in reports.
pub fn shape_hash(sig: &MethodSignature) -> String {
    base62_encode(xxh64(canonical_shape(sig).as_bytes(), 0))
}
