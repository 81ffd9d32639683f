use crate::catalog::{group_by_category, search};
use crate::commands::{CmdMessage, CmdResult};
use crate::model::Diagram;

/// Filter the catalog by `term` and group what is left by category.
pub fn run(catalog: Vec<Diagram>, term: Option<&str>) -> CmdResult {
    let total = catalog.len();
    let term = term.map(str::trim).filter(|t| !t.is_empty());

    let listed = match term {
        Some(term) => search(&catalog, term),
        None => catalog,
    };

    let mut result = CmdResult {
        total,
        ..Default::default()
    };
    if listed.is_empty() {
        result.add_message(CmdMessage::info(if term.is_some() {
            "No diagrams match your search."
        } else {
            "No diagrams found."
        }));
    }

    let groups = group_by_category(&listed);
    result.with_groups(groups).with_listed_diagrams(listed)
}
