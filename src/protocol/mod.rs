//! # Protocol Layer
//!
//! Application-facing pieces built on the packet core: the logical
//! kind registry and the declarative record mapping.
//!
//! ## Components
//! - **Kind**: registry mapping application kinds to `(type, subtype)` pairs
//! - **Convert**: record ↔ packet serialization driven by static bindings

pub mod convert;
pub mod kind;
