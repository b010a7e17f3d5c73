use strata_core::Repository;
use strata_integrity::{PassSummary, TaskSummary};

use crate::cli::{GlobalFlags, SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `strata schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Pass => schemars::schema_for!(PassSummary),
        SchemaType::Task => schemars::schema_for!(TaskSummary),
        SchemaType::Repository => schemars::schema_for!(Vec<Repository>),
    };
    output(&schema, flags.format)
}
