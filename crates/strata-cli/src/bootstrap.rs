use strata_config::StrataConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, honouring `--config` and a local `.env`.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<StrataConfig> {
    let config = StrataConfig::load_with_dotenv(flags.config.as_deref())?;
    tracing::debug!(
        catalog = %config.catalog.path,
        blob_root = %config.blob_store.root,
        "configuration loaded"
    );
    Ok(config)
}
