use crate::utils::parser::{self, Assignment, RangeSpec};
use clap::{Args, Parser, Subcommand, ValueEnum};
use matcalc::engine::composition::CompositionUnit;
use matcalc::engine::config::APPLICATION_DIRECTORY_ENV;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "MatCalc CLI - drive the MatCalc mc_core engine from the command line: run scripts, calculate equilibria and scan composition grids.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Options that decide which engine is opened and how it is prepared.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Path to a session file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// MatCalc application directory containing the mc_core library.
    #[arg(short = 'd', long, global = true, env = APPLICATION_DIRECTORY_ENV, value_name = "PATH")]
    pub application_directory: Option<PathBuf>,

    /// Load this library file instead of searching the application directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub library_file: Option<PathBuf>,

    /// Keep the current working directory instead of switching to the application directory.
    #[arg(long, global = true)]
    pub no_chdir: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which engine library would be loaded.
    Locate,
    /// Send every line of a MatCalc script to the engine.
    Run(RunArgs),
    /// Calculate a single equilibrium and print selected variables.
    Equilibrium(EquilibriumArgs),
    /// Calculate equilibria over a temperature by composition grid and write CSV.
    Scan(ScanArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script file; each non-blank line is sent verbatim as one command.
    #[arg(required = true, value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Send commands through the engine's alternate (NewColine) entry point.
    #[arg(long)]
    pub new_coline: bool,

    /// Report failing commands and continue with the rest of the script.
    #[arg(long)]
    pub keep_going: bool,
}

/// Composition entries shared by `equilibrium`.
#[derive(Args, Debug, Clone, Default)]
pub struct CompositionArgs {
    /// Mole fraction of an element, e.g. -x C=0.01. Can be repeated.
    #[arg(short = 'x', long = "mole-fraction", value_name = "EL=VALUE", value_parser = parser::parse_assignment)]
    pub mole_fractions: Vec<Assignment>,

    /// Weight fraction of an element, e.g. -w Mn=0.015. Can be repeated.
    #[arg(short = 'w', long = "weight-fraction", value_name = "EL=VALUE", value_parser = parser::parse_assignment)]
    pub weight_fractions: Vec<Assignment>,

    /// Site fraction of an element, e.g. -u C=0.05. Can be repeated.
    #[arg(short = 'u', long = "site-fraction", value_name = "EL=VALUE", value_parser = parser::parse_assignment)]
    pub site_fractions: Vec<Assignment>,
}

/// Arguments for the `equilibrium` subcommand.
#[derive(Args, Debug)]
pub struct EquilibriumArgs {
    /// Temperature in kelvin.
    #[arg(short = 'T', long, required = true, value_name = "KELVIN")]
    pub temperature: f64,

    #[command(flatten)]
    pub composition: CompositionArgs,

    /// Engine variable to print after the calculation, e.g. -g 'F$FCC_A1'. Can be repeated.
    #[arg(short = 'g', long = "get", value_name = "VARIABLE")]
    pub variables: Vec<String>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Element whose fraction is scanned.
    #[arg(short, long, required = true, value_name = "ELEMENT")]
    pub element: String,

    /// Composition unit of the scanned fraction.
    #[arg(long, value_enum, default_value_t = UnitArg::X)]
    pub unit: UnitArg,

    /// Temperature axis in kelvin as START:STOP:COUNT, e.g. 700:1200:50.
    #[arg(short = 'T', long, required = true, value_name = "START:STOP:COUNT", value_parser = parser::parse_range)]
    pub temperature: RangeSpec,

    /// Fraction axis as START:STOP:COUNT, e.g. 0.001:0.1:20.
    #[arg(short, long, required = true, value_name = "START:STOP:COUNT", value_parser = parser::parse_range)]
    pub fraction: RangeSpec,

    /// Space fraction values logarithmically instead of linearly.
    #[arg(long)]
    pub log_fraction: bool,

    /// Engine variable recorded at every point. Can be repeated.
    #[arg(short = 'g', long = "get", required = true, value_name = "VARIABLE")]
    pub variables: Vec<String>,

    /// Write CSV here instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Composition unit as given on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitArg {
    /// Mole fraction
    X,
    /// Weight fraction
    W,
    /// Site fraction
    U,
}

impl From<UnitArg> for CompositionUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::X => CompositionUnit::MoleFraction,
            UnitArg::W => CompositionUnit::WeightFraction,
            UnitArg::U => CompositionUnit::SiteFraction,
        }
    }
}
