use crate::engine::error::EngineError;
use std::ffi::{c_char, c_double, c_int, c_void};
use std::ptr::NonNull;
use tracing::debug;

pub const INITIALIZE_EXTERNAL_CONST_CHAR: &str = "MCC_InitializeExternalConstChar";
pub const PROCESS_COMMAND_LINE_INPUT: &str = "MCCOL_ProcessCommandLineInput";
pub const PROCESS_COMMAND_LINE_INPUT_NEW_COLINE: &str = "MCCOL_ProcessCommandLineInputNewColine";
pub const CALC_EQUILIBRIUM: &str = "MCC_CalcEquilibrium";
pub const SET_TEMPERATURE: &str = "MCC_SetTemperature";
pub const GET_MC_VARIABLE: &str = "MCC_GetMCVariable";

/// Every export a handle binds at construction, in binding order.
pub const REQUIRED_SYMBOLS: [&str; 6] = [
    INITIALIZE_EXTERNAL_CONST_CHAR,
    PROCESS_COMMAND_LINE_INPUT,
    PROCESS_COMMAND_LINE_INPUT_NEW_COLINE,
    CALC_EQUILIBRIUM,
    SET_TEMPERATURE,
    GET_MC_VARIABLE,
];

/// `bool MCC_InitializeExternalConstChar(const char*, bool)`
pub type InitializeFn = unsafe extern "C" fn(*const c_char, bool) -> bool;
/// `int MCCOL_ProcessCommandLineInput(char*)` and its `NewColine` sibling.
pub type ProcessCommandFn = unsafe extern "C" fn(*mut c_char) -> c_int;
/// `int MCC_CalcEquilibrium(bool, int)`
pub type CalcEquilibriumFn = unsafe extern "C" fn(bool, c_int) -> c_int;
/// `double MCC_SetTemperature(double, bool)`
pub type SetTemperatureFn = unsafe extern "C" fn(c_double, bool) -> c_double;
/// `double MCC_GetMCVariable(char*)`
pub type GetVariableFn = unsafe extern "C" fn(*mut c_char) -> c_double;

/// Looks up exported symbols by name.
///
/// # Safety
///
/// Implementors promise that any address returned for one of the names in this module
/// points to a function with the matching signature declared above, and that the
/// address stays callable for as long as the resolver itself is alive.
pub unsafe trait SymbolResolver {
    /// Returns the address of `symbol`, or `None` if the library does not export it.
    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>>;
}

/// The typed entry points of one loaded engine.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bindings {
    pub initialize_external_const_char: InitializeFn,
    pub process_command_line_input: ProcessCommandFn,
    pub process_command_line_input_new_coline: ProcessCommandFn,
    pub calc_equilibrium: CalcEquilibriumFn,
    pub set_temperature: SetTemperatureFn,
    pub get_mc_variable: GetVariableFn,
}

impl Bindings {
    /// Binds all required exports, failing on the first one that is missing.
    ///
    /// # Safety
    ///
    /// The returned pointers are only valid while `resolver` is alive; the caller must
    /// keep the two together.
    pub(crate) unsafe fn resolve(resolver: &impl SymbolResolver) -> Result<Self, EngineError> {
        unsafe {
            Ok(Self {
                initialize_external_const_char: bind(resolver, INITIALIZE_EXTERNAL_CONST_CHAR)?,
                process_command_line_input: bind(resolver, PROCESS_COMMAND_LINE_INPUT)?,
                process_command_line_input_new_coline: bind(
                    resolver,
                    PROCESS_COMMAND_LINE_INPUT_NEW_COLINE,
                )?,
                calc_equilibrium: bind(resolver, CALC_EQUILIBRIUM)?,
                set_temperature: bind(resolver, SET_TEMPERATURE)?,
                get_mc_variable: bind(resolver, GET_MC_VARIABLE)?,
            })
        }
    }
}

/// `F` must be one of the function pointer types above.
unsafe fn bind<F: Copy>(
    resolver: &impl SymbolResolver,
    symbol: &'static str,
) -> Result<F, EngineError> {
    debug_assert_eq!(size_of::<F>(), size_of::<*mut c_void>());

    let address = resolver
        .resolve(symbol)
        .ok_or(EngineError::MissingSymbol { symbol })?;
    debug!("Bound '{}' at {:p}", symbol, address);

    Ok(unsafe { std::mem::transmute_copy::<*mut c_void, F>(&address.as_ptr()) })
}
