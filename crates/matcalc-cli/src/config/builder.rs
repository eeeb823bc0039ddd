use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::SessionConfig;
use crate::cli::SessionArgs;
use crate::error::{CliError, Result};
use matcalc::engine::config::{APPLICATION_DIRECTORY_ENV, EngineConfigBuilder};
use tracing::debug;

/// Merges command-line arguments (including `MATCALC_DIR`) over the session file over
/// built-in defaults.
pub fn build_session(args: &SessionArgs) -> Result<SessionConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let setup = file_config.setup.unwrap_or_default();

    let application_directory = args
        .application_directory
        .clone()
        .or(file_config.application_directory)
        .ok_or_else(|| {
            CliError::Config(format!(
                "An application directory is required. Pass --application-directory, set {}, or add 'application-directory' to the session file.",
                APPLICATION_DIRECTORY_ENV
            ))
        })?;

    let change_working_directory = if args.no_chdir {
        false
    } else {
        file_config
            .change_working_directory
            .unwrap_or(defaults.change_working_directory)
    };

    let engine = EngineConfigBuilder::new()
        .application_directory(application_directory)
        .library_file(args.library_file.clone().or(file_config.library_file))
        .change_working_directory(change_working_directory)
        .build()?;
    debug!("Resolved engine configuration: {:?}", engine);

    Ok(SessionConfig {
        engine,
        setup_commands: setup.commands,
        setup_new_coline: setup.new_coline.unwrap_or(defaults.setup_new_coline),
    })
}
