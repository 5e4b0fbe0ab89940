//! Source front ends for strictabc.
//!
//! Turns Python modules into [`ClassDef`](strictabc_core::class::ClassDef)
//! member tables so the enforcement engine can validate them.

pub mod python;
pub mod treesitter;
pub mod walker;
