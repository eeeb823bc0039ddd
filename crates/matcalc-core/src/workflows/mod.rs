//! # Workflows
//!
//! Host-side procedures built from the handle's primitive calls. They carry no
//! thermodynamics of their own; they only sequence temperature, composition,
//! equilibrium and variable reads the way a MatCalc script would.
//!
//! - [`equilibrium`] - one equilibrium point with a list of variables to read back
//! - [`scan`] - the same over a temperature by composition grid, tolerating points
//!   where the engine fails
//! - [`grid`] - linear and logarithmic axis helpers for scans

pub mod equilibrium;
pub mod grid;
pub mod scan;
