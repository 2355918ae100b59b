// es-renderer/src/platform/generic/mod.rs
//
//! Backends that are shared by more than one platform.

pub mod gl;
