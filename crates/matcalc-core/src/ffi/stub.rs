//! In-process stand-in for `mc_core`, used by the unit tests.
//!
//! Each export is a real `extern "C"` function that records its arguments into
//! thread-local state, so every test (which runs on its own thread) sees only its own
//! calls. Status codes and variable values are scripted through the free functions.

use super::symbols::{
    self, CalcEquilibriumFn, GetVariableFn, InitializeFn, ProcessCommandFn, SetTemperatureFn,
    SymbolResolver,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::ffi::{CStr, c_char, c_double, c_int, c_void};
use std::ptr::NonNull;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Initialize { directory: String, flag: bool },
    Command(String),
    CommandNewColine(String),
    CalcEquilibrium { flag: bool, mode: c_int },
    SetTemperature { kelvin: f64, flag: bool },
    GetVariable(String),
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
    static COMMAND_STATUSES: RefCell<HashMap<String, c_int>> = RefCell::new(HashMap::new());
    static EQUILIBRIUM_STATUSES: RefCell<VecDeque<c_int>> = const { RefCell::new(VecDeque::new()) };
    static VARIABLES: RefCell<HashMap<String, f64>> = RefCell::new(HashMap::new());
    static TEMPERATURE: Cell<f64> = const { Cell::new(0.0) };
    static INITIALIZE_RESULT: Cell<bool> = const { Cell::new(true) };
}

#[derive(Debug)]
pub(crate) struct StubLibrary {
    missing: Option<&'static str>,
}

impl StubLibrary {
    /// A library exporting all six symbols, with this thread's recorded state cleared.
    pub(crate) fn new() -> Self {
        reset();
        Self { missing: None }
    }

    /// A library that lacks `symbol`.
    pub(crate) fn without(symbol: &'static str) -> Self {
        reset();
        Self {
            missing: Some(symbol),
        }
    }
}

unsafe impl SymbolResolver for StubLibrary {
    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        if self.missing == Some(symbol) {
            return None;
        }
        let address = match symbol {
            symbols::INITIALIZE_EXTERNAL_CONST_CHAR => {
                initialize_external_const_char as InitializeFn as *mut c_void
            }
            symbols::PROCESS_COMMAND_LINE_INPUT => {
                process_command_line_input as ProcessCommandFn as *mut c_void
            }
            symbols::PROCESS_COMMAND_LINE_INPUT_NEW_COLINE => {
                process_command_line_input_new_coline as ProcessCommandFn as *mut c_void
            }
            symbols::CALC_EQUILIBRIUM => calc_equilibrium as CalcEquilibriumFn as *mut c_void,
            symbols::SET_TEMPERATURE => set_temperature as SetTemperatureFn as *mut c_void,
            symbols::GET_MC_VARIABLE => get_mc_variable as GetVariableFn as *mut c_void,
            _ => return None,
        };
        NonNull::new(address)
    }
}

fn reset() {
    CALLS.with_borrow_mut(Vec::clear);
    COMMAND_STATUSES.with_borrow_mut(HashMap::clear);
    EQUILIBRIUM_STATUSES.with_borrow_mut(VecDeque::clear);
    VARIABLES.with_borrow_mut(HashMap::clear);
    TEMPERATURE.set(0.0);
    INITIALIZE_RESULT.set(true);
}

pub(crate) fn calls() -> Vec<Call> {
    CALLS.with_borrow(Clone::clone)
}

/// Text of every command received through either command entry point, in order.
pub(crate) fn commands() -> Vec<String> {
    calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Command(text) | Call::CommandNewColine(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Makes both command entry points answer `code` for exactly this command text.
pub(crate) fn fail_command(command: &str, code: c_int) {
    COMMAND_STATUSES.with_borrow_mut(|statuses| statuses.insert(command.to_string(), code));
}

/// Queues a status for an upcoming equilibrium call; calls beyond the queue succeed.
pub(crate) fn queue_equilibrium_status(code: c_int) {
    EQUILIBRIUM_STATUSES.with_borrow_mut(|queue| queue.push_back(code));
}

pub(crate) fn set_variable(name: &str, value: f64) {
    VARIABLES.with_borrow_mut(|variables| variables.insert(name.to_string(), value));
}

pub(crate) fn reject_initialization() {
    INITIALIZE_RESULT.set(false);
}

fn record(call: Call) {
    CALLS.with_borrow_mut(|calls| calls.push(call));
}

unsafe fn read_text(text: *const c_char) -> String {
    unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
}

fn command_status(command: &str) -> c_int {
    COMMAND_STATUSES.with_borrow(|statuses| statuses.get(command).copied().unwrap_or(0))
}

unsafe extern "C" fn initialize_external_const_char(directory: *const c_char, flag: bool) -> bool {
    let directory = unsafe { read_text(directory) };
    record(Call::Initialize { directory, flag });
    INITIALIZE_RESULT.get()
}

unsafe extern "C" fn process_command_line_input(command: *mut c_char) -> c_int {
    let command = unsafe { read_text(command) };
    let status = command_status(&command);
    record(Call::Command(command));
    status
}

unsafe extern "C" fn process_command_line_input_new_coline(command: *mut c_char) -> c_int {
    let command = unsafe { read_text(command) };
    let status = command_status(&command);
    record(Call::CommandNewColine(command));
    status
}

unsafe extern "C" fn calc_equilibrium(flag: bool, mode: c_int) -> c_int {
    record(Call::CalcEquilibrium { flag, mode });
    EQUILIBRIUM_STATUSES.with_borrow_mut(|queue| queue.pop_front().unwrap_or(0))
}

unsafe extern "C" fn set_temperature(kelvin: c_double, flag: bool) -> c_double {
    record(Call::SetTemperature { kelvin, flag });
    TEMPERATURE.replace(kelvin)
}

unsafe extern "C" fn get_mc_variable(name: *mut c_char) -> c_double {
    let name = unsafe { read_text(name) };
    let value = VARIABLES.with_borrow(|variables| variables.get(&name).copied().unwrap_or(f64::NAN));
    record(Call::GetVariable(name));
    value
}
