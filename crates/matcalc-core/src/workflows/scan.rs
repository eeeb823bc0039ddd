use super::equilibrium::read_variables;
use crate::engine::Engine;
use crate::engine::composition::{CompositionUnit, format_value};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::ffi::SymbolResolver;
use std::ffi::CString;
use tracing::{info, instrument, warn};

/// A temperature by composition grid for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub element: String,
    pub unit: CompositionUnit,
    pub temperatures: Vec<f64>,
    pub fractions: Vec<f64>,
    pub variables: Vec<String>,
}

impl ScanConfig {
    pub fn total_points(&self) -> usize {
        self.temperatures.len() * self.fractions.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanPoint {
    pub temperature_kelvin: f64,
    pub fraction: f64,
    /// `false` if the engine rejected the composition or the equilibrium calculation.
    pub converged: bool,
    /// Aligned with [`ScanConfig::variables`]; empty when not converged.
    pub values: Vec<f64>,
}

/// Runs an equilibrium calculation at every grid point.
///
/// Fractions form the outer loop and temperatures the inner one. A status error from the
/// engine at one point is recorded on that point and the scan moves on; any other error
/// ends the scan.
#[instrument(skip_all, name = "scan_workflow")]
pub fn run<R: SymbolResolver>(
    engine: &mut Engine<R>,
    config: &ScanConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<ScanPoint>, EngineError> {
    validate_text(&config.element)?;
    for variable in &config.variables {
        validate_text(variable)?;
    }

    reporter.report(Progress::PhaseStart {
        name: "Equilibrium scan",
    });
    info!(
        "Scanning {} points: {} {} values by {} temperatures.",
        config.total_points(),
        config.element,
        config.unit,
        config.temperatures.len()
    );
    reporter.report(Progress::TaskStart {
        total_steps: config.total_points() as u64,
    });

    let mut points = Vec::with_capacity(config.total_points());
    let mut failures = 0usize;
    for &fraction in &config.fractions {
        for &temperature in &config.temperatures {
            reporter.report(Progress::StatusUpdate {
                text: format!(
                    "T = {} K, {} = {}",
                    temperature,
                    config.element,
                    format_value(fraction)
                ),
            });

            let point = match calculate_point(engine, config, temperature, fraction) {
                Ok(values) => ScanPoint {
                    temperature_kelvin: temperature,
                    fraction,
                    converged: true,
                    values,
                },
                Err(e) if e.is_engine_status() => {
                    warn!(
                        "No equilibrium at T = {} K, {} = {}: {}",
                        temperature,
                        config.element,
                        format_value(fraction),
                        e
                    );
                    failures += 1;
                    ScanPoint {
                        temperature_kelvin: temperature,
                        fraction,
                        converged: false,
                        values: Vec::new(),
                    }
                }
                Err(e) => return Err(e),
            };
            points.push(point);
            reporter.report(Progress::TaskIncrement);
        }
    }

    reporter.report(Progress::TaskFinish);
    if failures > 0 {
        reporter.report(Progress::Message(format!(
            "{} of {} points did not converge",
            failures,
            points.len()
        )));
    }
    reporter.report(Progress::PhaseFinish);
    info!(
        "Scan finished: {} points, {} failed.",
        points.len(),
        failures
    );

    Ok(points)
}

fn calculate_point<R: SymbolResolver>(
    engine: &mut Engine<R>,
    config: &ScanConfig,
    temperature: f64,
    fraction: f64,
) -> Result<Vec<f64>, EngineError> {
    engine.set_temperature_kelvin(temperature);
    engine.set_element_fraction(config.unit, &config.element, fraction)?;
    engine.calculate_equilibrium()?;
    read_variables(engine, &config.variables)
}

fn validate_text(text: &str) -> Result<(), EngineError> {
    CString::new(text)
        .map(drop)
        .map_err(|_| EngineError::InteriorNul {
            text: text.to_string(),
        })
}
