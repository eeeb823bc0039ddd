//! # Foreign Interface
//!
//! Everything that touches raw addresses lives here. [`symbols`] names the six exports
//! the handle depends on and declares their C signatures; [`library`] finds and loads
//! the `mc_core` shared library and answers symbol lookups against it.
//!
//! The [`SymbolResolver`] trait is the seam between the two: the engine handle binds
//! its entry points through any resolver, so a test double can stand in for the real
//! library.

pub mod library;
pub mod symbols;

#[cfg(test)]
pub(crate) mod stub;

pub use library::McCoreLibrary;
pub use symbols::SymbolResolver;
