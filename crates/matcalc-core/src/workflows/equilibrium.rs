use crate::engine::Engine;
use crate::engine::composition::CompositionEntry;
use crate::engine::error::EngineError;
use crate::ffi::SymbolResolver;
use tracing::{debug, info, instrument};

/// A single equilibrium calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumQuery {
    pub temperature_kelvin: f64,
    /// Applied in order before the calculation.
    pub composition: Vec<CompositionEntry>,
    /// Engine variable names read back after a successful calculation.
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquilibriumPoint {
    pub temperature_kelvin: f64,
    /// `(name, value)` in the order the variables were requested.
    pub values: Vec<(String, f64)>,
}

impl EquilibriumPoint {
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(variable, _)| variable == name)
            .map(|(_, value)| *value)
    }
}

/// Sets temperature and composition, calculates equilibrium and reads the variables.
///
/// The first failing engine call aborts the workflow; whatever state the engine was
/// left in is not rolled back.
#[instrument(skip_all, name = "equilibrium_workflow")]
pub fn run<R: SymbolResolver>(
    engine: &mut Engine<R>,
    query: &EquilibriumQuery,
) -> Result<EquilibriumPoint, EngineError> {
    info!(
        "Calculating equilibrium at {} K with {} composition entries.",
        query.temperature_kelvin,
        query.composition.len()
    );

    engine.set_temperature_kelvin(query.temperature_kelvin);
    for entry in &query.composition {
        debug!("Setting {} of {} to {}", entry.unit, entry.element, entry.value);
        engine.set_element_fraction(entry.unit, &entry.element, entry.value)?;
    }
    engine.calculate_equilibrium()?;

    let values = read_variables(engine, &query.variables)?
        .into_iter()
        .zip(&query.variables)
        .map(|(value, name)| (name.clone(), value))
        .collect();

    Ok(EquilibriumPoint {
        temperature_kelvin: query.temperature_kelvin,
        values,
    })
}

pub(crate) fn read_variables<R: SymbolResolver>(
    engine: &mut Engine<R>,
    variables: &[String],
) -> Result<Vec<f64>, EngineError> {
    variables
        .iter()
        .map(|name| engine.get_variable(name))
        .collect()
}
