use strata_config::StrataConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: StrataConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Check(args) => commands::check::handle(args, config, flags).await,
        Commands::Repositories(args) => commands::repositories::handle(&args, &config, flags),
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
