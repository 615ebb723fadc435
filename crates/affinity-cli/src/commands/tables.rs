use super::{Context, load_tables};
use crate::cli::TablesArgs;
use crate::error::{CliError, Result};
use crate::report;

pub fn run(args: TablesArgs, context: Context) -> Result<()> {
    let settings = context.settings(&args.source, None)?;
    let tables = load_tables(&settings)?;

    print!("{}", report::format_table_summary(&tables, args.show));

    if let Some(entity) = &args.entity {
        let partners = report::format_partners(&tables, entity).ok_or_else(|| {
            CliError::Config(format!("Entity '{}' is not part of the universe.", entity))
        })?;
        print!("{partners}");
    }
    Ok(())
}
