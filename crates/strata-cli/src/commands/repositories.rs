use anyhow::Context;
use strata_catalog::CatalogReader;
use strata_config::StrataConfig;

use crate::cli::{GlobalFlags, RepositoriesArgs};
use crate::commands::shared::open_catalog;
use crate::output::output;

/// Handle `strata repositories`.
pub fn handle(
    args: &RepositoriesArgs,
    config: &StrataConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let catalog = open_catalog(config)?;
    let repositories = match &args.blob_store {
        Some(blob_store) => catalog.repositories_for_blob_store(blob_store),
        None => catalog.repositories(),
    }
    .context("failed to list repositories")?;

    output(&repositories, flags.format)
}
