//! # MatCalc Bindings
//!
//! Runtime bindings to `mc_core`, the closed-source computational engine shipped with
//! MatCalc. The engine is loaded as a shared library when a handle is opened; all
//! thermodynamic work happens inside it. This crate only finds the library, binds its
//! exports to typed function pointers, marshals command text and scalars across the
//! boundary, and turns non-zero status codes into errors.
//!
//! ## Architecture
//!
//! - **[`ffi`]: The Boundary.** Export names and signatures, the [`ffi::SymbolResolver`]
//!   seam, and the `libloading`-backed [`ffi::McCoreLibrary`].
//!
//! - **[`engine`]: The Handle.** [`engine::Engine`] owns a resolver and the six bound
//!   entry points, and exposes them as checked Rust calls. Configuration, composition
//!   commands, errors and progress reporting live next to it.
//!
//! - **[`workflows`]: Host Procedures.** Small drivers built on the handle, such as a
//!   single equilibrium point or a temperature by composition scan.
//!
//! ## Example
//!
//! ```no_run
//! use matcalc::engine::{config::EngineConfigBuilder, Engine};
//!
//! let config = EngineConfigBuilder::new()
//!     .application_directory("C:/MatCalc".into())
//!     .build()?;
//! let mut engine = Engine::open(&config)?;
//! engine.init();
//! engine.execute_command("use-module core")?;
//! engine.set_temperature_kelvin(1000.0);
//! engine.set_element_mole_fraction("C", 0.01)?;
//! engine.calculate_equilibrium()?;
//! let fcc = engine.get_variable("F$FCC_A1")?;
//! # let _ = fcc;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod ffi;
pub mod workflows;

pub use engine::Engine;
pub use engine::error::EngineError;
