use matcalc::engine::config::EngineConfig;

/// Everything needed to open, initialise and prepare an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub engine: EngineConfig,
    /// Sent after `init()`, before the subcommand's own work.
    pub setup_commands: Vec<String>,
    /// Send setup commands through the NewColine entry point.
    pub setup_new_coline: bool,
}
