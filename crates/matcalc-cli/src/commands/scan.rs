use super::open_session;
use crate::cli::ScanArgs;
use crate::config::SessionConfig;
use crate::error::{CliError, Result};
use crate::utils::parser::RangeSpec;
use crate::utils::progress::CliProgressHandler;
use matcalc::engine::progress::ProgressReporter;
use matcalc::workflows::grid::{linspace, logspace};
use matcalc::workflows::scan::{self, ScanConfig, ScanPoint};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: ScanArgs, session: &SessionConfig) -> Result<()> {
    let config = ScanConfig {
        element: args.element,
        unit: args.unit.into(),
        temperatures: axis(args.temperature, false)?,
        fractions: axis(args.fraction, args.log_fraction)?,
        variables: args.variables,
    };

    // Opening the engine may change the working directory.
    let output = match &args.output {
        Some(path) => {
            let path = absolute_output(path)?;
            let file = File::create(&path)?;
            Some((path, file))
        }
        None => None,
    };

    let mut engine = open_session(session)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let points = scan::run(&mut engine, &config, &reporter)?;

    let failed = points.iter().filter(|p| !p.converged).count();
    if failed > 0 {
        warn!("{} of {} points did not converge.", failed, points.len());
    }

    match output {
        Some((path, file)) => {
            info!("Writing {} points to {:?}", points.len(), path);
            write_csv(file, &config.variables, &points)?;
            println!("✓ Scan written to: {}", path.display());
        }
        None => write_csv(std::io::stdout().lock(), &config.variables, &points)?,
    }
    Ok(())
}

/// Anchors a relative output path to the directory the command was started from.
fn absolute_output(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

fn axis(range: RangeSpec, logarithmic: bool) -> Result<Vec<f64>> {
    if range.count == 0 {
        return Err(CliError::Argument(
            "A scan axis needs at least one point.".to_string(),
        ));
    }
    if !logarithmic {
        return Ok(linspace(range.start, range.stop, range.count));
    }
    if range.start <= 0.0 || range.stop <= 0.0 {
        return Err(CliError::Argument(format!(
            "Logarithmic axes need positive endpoints, got {}:{}.",
            range.start, range.stop
        )));
    }
    Ok(logspace(range.start.log10(), range.stop.log10(), range.count))
}

/// One row per point; variable cells are left empty where the point did not converge.
fn write_csv<W: Write>(writer: W, variables: &[String], points: &[ScanPoint]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["temperature", "fraction", "converged"];
    header.extend(variables.iter().map(String::as_str));
    csv_writer.write_record(&header)?;

    for point in points {
        let mut record = vec![
            point.temperature_kelvin.to_string(),
            point.fraction.to_string(),
            point.converged.to_string(),
        ];
        if point.converged {
            record.extend(point.values.iter().map(f64::to_string));
        } else {
            record.extend(variables.iter().map(|_| String::new()));
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
