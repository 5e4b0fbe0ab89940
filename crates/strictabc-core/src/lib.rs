//! Core types and configuration for strictabc.
//!
//! This crate provides the data model shared by every strictabc crate:
//! - [`types`]: Type references, parameters, and canonical method signatures
//! - [`typeref`]: Parsing of type expressions into [`TypeRef`](types::TypeRef)
//! - [`class`]: Class member tables and the marker-carrying method descriptors
//! - [`config`]: Configuration loading from `.strictabc/strictabc.json`
//! - [`hash`]: Deterministic structural hashing (base62 of xxhash64)

pub mod class;
pub mod config;
pub mod hash;
pub mod typeref;
pub mod types;
