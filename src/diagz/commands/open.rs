use crate::commands::helpers::{require_diagram, resolve_target};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Diagram;
use crate::source::local::LocalRegistrySource;

/// Resolve what a viewer should open. Launching it is up to the client.
pub fn run(
    catalog: &[Diagram],
    id: &str,
    version: Option<&str>,
    local: &LocalRegistrySource,
) -> Result<CmdResult> {
    let diagram = require_diagram(catalog, id)?;
    let target = resolve_target(diagram, version, local)?;
    Ok(CmdResult::default().with_targets(vec![target.location]))
}
