//! Enforcement engine for strictabc class contracts.
//!
//! Validates each subclass against the restricted-abstract methods of its
//! immediate parent and produces numbered findings:
//! - A001: missing override (parent method not implemented)
//! - A002: return type differs
//! - A003: parameter count differs
//! - A004: parameter or receiver name differs
//! - A005: parameter type differs at a position

pub mod compare;
pub mod define;
pub mod diff;
pub mod engine;
pub mod explain;
pub mod extract;
pub mod suppress;
pub mod types;
pub mod validate;
