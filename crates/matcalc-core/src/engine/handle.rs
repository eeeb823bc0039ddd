use super::composition::{CompositionUnit, composition_command};
use super::config::EngineConfig;
use super::error::EngineError;
use crate::ffi::McCoreLibrary;
use crate::ffi::symbols::{Bindings, ProcessCommandFn, SymbolResolver};
use std::cell::Cell;
use std::ffi::{CString, c_char};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

const SET_WORKING_DIRECTORY_COMMAND: &str = "set-working-directory ./";
const SET_APPLICATION_DIRECTORY_COMMAND: &str = "set-application-directory";

/// A loaded `mc_core` engine and its bound entry points.
///
/// The handle is generic over the [`SymbolResolver`] that supplied its entry points and
/// keeps that resolver alive for its whole lifetime; for [`McCoreLibrary`] this means
/// the shared library is unloaded when the handle is dropped.
///
/// Every call into the engine takes `&mut self`, and the handle is not `Sync`.
#[derive(Debug)]
pub struct Engine<R: SymbolResolver = McCoreLibrary> {
    bindings: Bindings,
    application_directory: PathBuf,
    application_directory_text: CString,
    resolver: R,
    _not_sync: PhantomData<Cell<()>>,
}

impl Engine<McCoreLibrary> {
    /// Loads the engine library described by `config` and binds its exports.
    ///
    /// Relative paths are made absolute against the working directory at the time of
    /// the call, before the working directory is (optionally) changed to the
    /// application directory.
    #[instrument(skip_all, name = "engine_open")]
    pub fn open(config: &EngineConfig) -> Result<Self, EngineError> {
        let application_directory = absolute(&config.application_directory)?;
        let library_file = config.library_file.as_deref().map(absolute).transpose()?;

        if config.change_working_directory {
            std::env::set_current_dir(&application_directory).map_err(|source| {
                EngineError::DirectoryAccess {
                    path: application_directory.clone(),
                    source,
                }
            })?;
            debug!("Working directory changed to {:?}", application_directory);
        }

        let library = match library_file {
            Some(path) => McCoreLibrary::load(path)?,
            None => McCoreLibrary::open_in(&application_directory)?,
        };

        Self::with_resolver(application_directory, library)
    }

    /// The path of the loaded library file.
    pub fn library_path(&self) -> &Path {
        self.resolver.path()
    }
}

impl<R: SymbolResolver> Engine<R> {
    /// Binds the six required exports from `resolver`.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::MissingSymbol`] if any export is absent, and with
    /// [`EngineError::InvalidApplicationDirectory`] if the directory is not valid UTF-8
    /// or contains a NUL byte.
    pub fn with_resolver(
        application_directory: impl Into<PathBuf>,
        resolver: R,
    ) -> Result<Self, EngineError> {
        let application_directory = application_directory.into();
        let application_directory_text = application_directory
            .to_str()
            .and_then(|text| CString::new(text).ok())
            .ok_or_else(|| EngineError::InvalidApplicationDirectory {
                path: application_directory.clone(),
            })?;

        // SAFETY: `resolver` is stored in the handle next to the bindings, so every bound
        // address outlives its use.
        let bindings = unsafe { Bindings::resolve(&resolver)? };
        debug!(
            "Engine bound for application directory {:?}",
            application_directory
        );

        Ok(Self {
            bindings,
            application_directory,
            application_directory_text,
            resolver,
            _not_sync: PhantomData,
        })
    }

    pub fn application_directory(&self) -> &Path {
        &self.application_directory
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Initialises the engine and points it at the application directory.
    ///
    /// Runs the initializer with the application directory, then
    /// `set-working-directory ./`, then `set-application-directory {dir}`. Nothing is
    /// returned: a rejected initializer or a non-zero status from either command is
    /// only logged.
    #[instrument(skip_all, name = "engine_init")]
    pub fn init(&mut self) {
        let accepted = unsafe {
            (self.bindings.initialize_external_const_char)(
                self.application_directory_text.as_ptr(),
                true,
            )
        };
        if !accepted {
            warn!(
                "Engine initializer returned false for {:?}",
                self.application_directory
            );
        }

        let application_directory_command = format!(
            "{} {}",
            SET_APPLICATION_DIRECTORY_COMMAND,
            self.application_directory_text.to_string_lossy()
        );
        for command in [
            SET_WORKING_DIRECTORY_COMMAND,
            application_directory_command.as_str(),
        ] {
            let mut buffer = nul_terminated(command);
            let code = dispatch(self.bindings.process_command_line_input, &mut buffer);
            if code != 0 {
                warn!("Setup command '{}' returned status {}", command, code);
            }
        }
    }

    /// Sends `command` verbatim through the engine's command entry point.
    ///
    /// # Errors
    ///
    /// [`EngineError::Command`] carrying the status and the command text when the
    /// engine returns non-zero.
    pub fn execute_command(&mut self, command: &str) -> Result<(), EngineError> {
        self.checked_command(self.bindings.process_command_line_input, command)
    }

    /// Like [`execute_command`](Self::execute_command), through the engine's `NewColine`
    /// command entry point.
    pub fn execute_command_new_coline(&mut self, command: &str) -> Result<(), EngineError> {
        self.checked_command(self.bindings.process_command_line_input_new_coline, command)
    }

    pub fn calculate_equilibrium(&mut self) -> Result<(), EngineError> {
        let code = unsafe { (self.bindings.calc_equilibrium)(false, 0) };
        trace!(code, "MCC_CalcEquilibrium");
        if code != 0 {
            return Err(EngineError::Equilibrium { code });
        }
        Ok(())
    }

    /// Sets the engine temperature. The value the engine returns is not checked.
    pub fn set_temperature_kelvin(&mut self, kelvin: f64) {
        let returned = unsafe { (self.bindings.set_temperature)(kelvin, false) };
        trace!(kelvin, returned, "MCC_SetTemperature");
    }

    pub fn set_element_fraction(
        &mut self,
        unit: CompositionUnit,
        element: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        self.execute_command(&composition_command(unit, element, value))
    }

    pub fn set_element_mole_fraction(
        &mut self,
        element: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        self.set_element_fraction(CompositionUnit::MoleFraction, element, value)
    }

    pub fn set_element_weight_fraction(
        &mut self,
        element: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        self.set_element_fraction(CompositionUnit::WeightFraction, element, value)
    }

    pub fn set_element_site_fraction(
        &mut self,
        element: &str,
        value: f64,
    ) -> Result<(), EngineError> {
        self.set_element_fraction(CompositionUnit::SiteFraction, element, value)
    }

    /// Reads a named engine variable such as `F$FCC_A1` or `MU$C`.
    ///
    /// The engine's answer is returned as is; unknown names are not reported as errors.
    pub fn get_variable(&mut self, name: &str) -> Result<f64, EngineError> {
        let mut buffer = marshal(name)?;
        let value =
            unsafe { (self.bindings.get_mc_variable)(buffer.as_mut_ptr().cast::<c_char>()) };
        trace!(name, value, "MCC_GetMCVariable");
        Ok(value)
    }

    fn checked_command(
        &mut self,
        entry: ProcessCommandFn,
        command: &str,
    ) -> Result<(), EngineError> {
        let mut buffer = marshal(command)?;
        let code = dispatch(entry, &mut buffer);
        if code != 0 {
            return Err(EngineError::Command {
                code,
                command: command.to_string(),
            });
        }
        Ok(())
    }
}

/// `buffer` must end in a NUL byte. The engine may write into it.
fn dispatch(entry: ProcessCommandFn, buffer: &mut [u8]) -> i32 {
    debug_assert_eq!(buffer.last(), Some(&0));
    let code = unsafe { entry(buffer.as_mut_ptr().cast::<c_char>()) };
    trace!(code, "command dispatched");
    code
}

/// A fresh NUL-terminated copy of `text` the engine is free to modify.
fn marshal(text: &str) -> Result<Vec<u8>, EngineError> {
    CString::new(text)
        .map(CString::into_bytes_with_nul)
        .map_err(|_| EngineError::InteriorNul {
            text: text.to_string(),
        })
}

/// For text already known to be free of NUL bytes.
fn nul_terminated(text: &str) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(text.len() + 1);
    buffer.extend_from_slice(text.as_bytes());
    buffer.push(0);
    buffer
}

fn absolute(path: &Path) -> Result<PathBuf, EngineError> {
    std::path::absolute(path).map_err(|source| EngineError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    })
}
