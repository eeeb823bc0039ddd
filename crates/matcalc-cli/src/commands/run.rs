use super::open_session;
use crate::cli::RunArgs;
use crate::config::SessionConfig;
use crate::error::{CliError, Result};
use tracing::{error, info};

pub fn run(args: RunArgs, session: &SessionConfig) -> Result<()> {
    let script = std::fs::read_to_string(&args.script)?;
    let commands = script_commands(&script);
    info!(
        "Read {} commands from {:?}",
        commands.len(),
        &args.script
    );

    let mut engine = open_session(session)?;

    let mut failed = 0;
    for command in &commands {
        info!("> {}", command);
        let result = if args.new_coline {
            engine.execute_command_new_coline(command)
        } else {
            engine.execute_command(command)
        };

        match result {
            Ok(()) => {}
            Err(e) if args.keep_going && e.is_engine_status() => {
                error!("{}", e);
                eprintln!("✗ {}", e);
                failed += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    if failed > 0 {
        return Err(CliError::ScriptFailures {
            failed,
            total: commands.len(),
        });
    }
    println!("✓ Executed {} commands.", commands.len());
    Ok(())
}

/// Non-blank lines of a script, without their line endings or surrounding whitespace.
fn script_commands(script: &str) -> Vec<&str> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
