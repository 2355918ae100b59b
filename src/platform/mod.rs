// es-renderer/src/platform/mod.rs
//
//! Platform-specific backends.
//!
//! Which backends exist is decided at build time; see `build.rs`.

pub mod generic;

#[cfg(eagl)]
pub mod eagl;
#[cfg(eagl)]
pub use eagl as default;
