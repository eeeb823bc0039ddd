pub mod equilibrium;
pub mod locate;
pub mod run;
pub mod scan;

use crate::config::SessionConfig;
use crate::error::Result;
use matcalc::Engine;
use tracing::info;

/// Opens the engine, initialises it and sends the session's setup commands.
pub fn open_session(session: &SessionConfig) -> Result<Engine> {
    info!(
        "Opening engine in {:?}",
        session.engine.application_directory
    );
    let mut engine = Engine::open(&session.engine)?;
    info!("Loaded engine library {:?}", engine.library_path());

    engine.init();

    for command in &session.setup_commands {
        info!("Setup: {}", command);
        if session.setup_new_coline {
            engine.execute_command_new_coline(command)?;
        } else {
            engine.execute_command(command)?;
        }
    }

    Ok(engine)
}
