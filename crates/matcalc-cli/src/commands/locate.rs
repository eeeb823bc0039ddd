use crate::config::SessionConfig;
use crate::error::Result;
use matcalc::ffi::McCoreLibrary;
use tracing::info;

pub fn run(session: &SessionConfig) -> Result<()> {
    let path = match &session.engine.library_file {
        Some(path) => {
            info!("Using the library file given in the configuration.");
            path.clone()
        }
        None => McCoreLibrary::locate(&session.engine.application_directory)?,
    };
    println!("{}", path.display());
    Ok(())
}
