//! # Engine Module
//!
//! This module implements the handle through which host code drives a loaded `mc_core`
//! engine.
//!
//! ## Overview
//!
//! [`Engine`] owns a symbol resolver together with the six entry points bound from it.
//! Each engine call takes the handle by exclusive reference: the foreign engine keeps
//! process-global mutable state and offers no locking of its own, so serialising access
//! is left to the borrow checker.
//!
//! ## Architecture
//!
//! - **Handle** ([`handle`]) - Construction, initialisation and the checked calls
//! - **Configuration** ([`config`]) - Application directory and library selection
//! - **Composition** ([`composition`]) - `enter-composition` command construction
//! - **Progress Monitoring** ([`progress`]) - Progress events for long-running workflows
//! - **Error Handling** ([`error`]) - Setup failures and engine status codes

pub mod composition;
pub mod config;
pub mod error;
pub mod handle;
pub mod progress;

pub use handle::Engine;
