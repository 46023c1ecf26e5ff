//! Command execution.
//!
//! Fatal errors are printed with recovery suggestions and mapped to
//! [`EXIT_FATAL`]; a run that attempted every asset but had failures exits
//! with [`EXIT_ASSET_FAILURES`].

mod check;
mod helpers;
mod publish;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;

use check::execute_check;
use publish::execute_publish;

/// Every asset handled successfully
pub const EXIT_SUCCESS: i32 = 0;
/// Run aborted before or instead of handling assets
pub const EXIT_FATAL: i32 = 1;
/// Run completed but at least one asset failed
pub const EXIT_ASSET_FAILURES: i32 = 2;

/// Execute the command selected by the parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(EXIT_FATAL);
    }

    let config = RuntimeConfig::from(&args);

    let result = match &args.command {
        Command::Publish(publish) => execute_publish(publish, &config).await,
        Command::Check(check) => execute_check(check, &config).await,
    };

    match result {
        Ok(exit_code) => Ok(exit_code),
        Err(e) => {
            config.error_println(&format!(
                "Command '{}' failed: {}",
                args.command.name(),
                e
            ));

            if !config.is_quiet() {
                let suggestions = e.recovery_suggestions();
                if !suggestions.is_empty() {
                    config.println("\n💡 Recovery suggestions:");
                    for suggestion in suggestions {
                        config.println(&format!("  • {}", suggestion));
                    }
                }
            }

            Ok(EXIT_FATAL)
        }
    }
}
