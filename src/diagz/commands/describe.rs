use crate::commands::helpers::require_diagram;
use crate::commands::{CmdMessage, CmdResult};
use crate::descriptions::DescriptionStore;
use crate::error::Result;
use crate::model::Diagram;
use crate::store::KeyValueStore;

/// Persist a description override for one diagram.
///
/// The diagram must exist in the catalog; a storage failure is reported as a
/// warning message, not an error.
pub fn run<K: KeyValueStore>(
    catalog: &[Diagram],
    id: &str,
    text: &str,
    descriptions: &DescriptionStore<K>,
) -> Result<CmdResult> {
    let diagram = require_diagram(catalog, id)?;
    let text = text.trim();

    let mut result = CmdResult::default();
    if descriptions.save(&diagram.id, text) {
        let message = if text.is_empty() {
            format!("Cleared description of {} {}", diagram.id, diagram.name)
        } else {
            format!("Saved description for {} {}", diagram.id, diagram.name)
        };
        result.add_message(CmdMessage::success(message));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Could not save description for {}",
            diagram.id
        )));
    }
    Ok(result)
}
