//! Grouping and filtering over a loaded catalog. Source-independent.

use crate::model::{numeric_id, Diagram};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub category: String,
    pub diagrams: Vec<Diagram>,
}

/// Group by display category, in the order categories are first seen.
pub fn group_by_category(diagrams: &[Diagram]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for diagram in diagrams {
        let category = diagram.display_category();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.diagrams.push(diagram.clone()),
            None => groups.push(CategoryGroup {
                category: category.to_string(),
                diagrams: vec![diagram.clone()],
            }),
        }
    }
    groups
}

/// Case-insensitive substring filter over id, name and category.
/// An empty term keeps everything.
pub fn search(diagrams: &[Diagram], term: &str) -> Vec<Diagram> {
    let term = term.to_lowercase();
    diagrams
        .iter()
        .filter(|d| {
            d.id.to_lowercase().contains(&term)
                || d.name.to_lowercase().contains(&term)
                || d.category.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Exact id match first, then numeric equality ("7" finds "007").
pub fn find_diagram<'a>(diagrams: &'a [Diagram], id: &str) -> Option<&'a Diagram> {
    diagrams.iter().find(|d| d.id == id).or_else(|| {
        let wanted = numeric_id(id)?;
        diagrams.iter().find(|d| d.numeric_id() == Some(wanted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram(id: &str, name: &str, category: &str) -> Diagram {
        Diagram {
            id: id.into(),
            name: name.into(),
            original_name: String::new(),
            drawio_file: None,
            current_version: "v1".into(),
            current_png_file: format!("{}_{}_v1.svg", id, name),
            category: category.into(),
            created: String::new(),
            last_modified: String::new(),
            versions: vec!["v1".into()],
            status: "active".into(),
            description: None,
            version_urls: None,
            image_url: None,
        }
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let input = vec![
            diagram("1", "One", "B"),
            diagram("2", "Two", "A"),
            diagram("3", "Three", "B"),
        ];
        let groups = group_by_category(&input);
        let keys: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(keys, vec!["B", "A"]);
        assert_eq!(groups[0].diagrams.len(), 2);
        assert_eq!(groups[0].diagrams[1].id, "3");
    }

    #[test]
    fn blank_category_groups_under_general() {
        let groups = group_by_category(&[diagram("1", "One", ""), diagram("2", "Two", "General")]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "General");
        assert_eq!(groups[0].diagrams.len(), 2);
    }

    #[test]
    fn empty_term_returns_input_unchanged() {
        let input = vec![diagram("2", "B", "X"), diagram("1", "A", "Y")];
        assert_eq!(search(&input, ""), input);
    }

    #[test]
    fn search_is_case_insensitive_on_category() {
        let input = vec![diagram("1", "Ledger", "Finance"), diagram("2", "Map", "Ops")];
        let found = search(&input, "fin");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn search_matches_id_and_name() {
        let input = vec![
            diagram("12", "Landscape", "Arch"),
            diagram("3", "SAP Cloud", "Arch"),
        ];
        assert_eq!(search(&input, "12").len(), 1);
        assert_eq!(search(&input, "CLOUD")[0].id, "3");
        assert!(search(&input, "nothing").is_empty());
    }

    #[test]
    fn find_accepts_unpadded_ids() {
        let input = vec![diagram("007", "Bond", "Spy"), diagram("10", "Ten", "X")];
        assert_eq!(find_diagram(&input, "007").unwrap().name, "Bond");
        assert_eq!(find_diagram(&input, "7").unwrap().name, "Bond");
        assert!(find_diagram(&input, "8").is_none());
    }
}
