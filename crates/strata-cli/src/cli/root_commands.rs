use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Audit catalog assets against their blob store.
    Check(CheckArgs),
    /// List repositories registered in the catalog.
    Repositories(RepositoriesArgs),
    /// Print the JSON schema of a command's output.
    Schema(SchemaArgs),
}

/// Arguments for `strata check`.
///
/// With neither flag, every repository of the configured default blob store
/// is checked.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Check a single repository.
    #[arg(long, conflicts_with = "blob_store")]
    pub repository: Option<String>,

    /// Check every repository stored in this blob store.
    #[arg(long)]
    pub blob_store: Option<String>,
}

/// Arguments for `strata repositories`.
#[derive(Clone, Debug, Args)]
pub struct RepositoriesArgs {
    /// Only list repositories stored in this blob store.
    #[arg(long)]
    pub blob_store: Option<String>,
}

/// Output types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    /// `strata check --repository`.
    Pass,
    /// `strata check --blob-store`.
    Task,
    /// `strata repositories`.
    Repository,
}

/// Arguments for `strata schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
