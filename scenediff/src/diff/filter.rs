//! Diff result filtering
//!
//! Mirrors the interactive filters of the diff window: a free-text search
//! across path, component type, and property path, plus a set of tracked
//! node paths that narrows results to specific subtrees.

use crate::diff::{ChangeItem, DiffResult, ModifiedItem};

/// Filter applied to a [`DiffResult`]
#[derive(Debug, Clone)]
pub struct DiffFilter {
    /// Case-insensitive substring matched against node path, component
    /// type, and property path; empty matches everything
    pub search: String,
    /// Stable paths of tracked nodes; empty tracks everything
    pub tracked_paths: Vec<String>,
    /// Whether descendants of tracked nodes also pass
    pub include_children: bool,
}

impl Default for DiffFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            tracked_paths: Vec::new(),
            include_children: true,
        }
    }
}

impl DiffFilter {
    /// Whether one change passes the filter
    pub fn passes(&self, node_path: &str, component_type: &str, property_path: Option<&str>) -> bool {
        self.passes_search(node_path, component_type, property_path)
            && self.matches_tracked(node_path)
    }

    fn passes_search(
        &self,
        node_path: &str,
        component_type: &str,
        property_path: Option<&str>,
    ) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        node_path.to_lowercase().contains(&needle)
            || component_type.to_lowercase().contains(&needle)
            || property_path
                .map(|p| p.to_lowercase().contains(&needle))
                .unwrap_or(false)
    }

    fn matches_tracked(&self, node_path: &str) -> bool {
        if self.tracked_paths.is_empty() {
            return true;
        }
        self.tracked_paths.iter().any(|tracked| {
            if node_path == tracked {
                return true;
            }
            // segment boundary: "Root[0]" tracks "Root[0]/Arm[1]" but
            // never "Root[0]x"
            self.include_children && node_path.starts_with(&format!("{tracked}/"))
        })
    }

    fn passes_change(&self, item: &ChangeItem) -> bool {
        self.passes(
            &item.node_path,
            &item.component_type,
            item.property_path.as_deref(),
        )
    }

    fn passes_modified(&self, item: &ModifiedItem) -> bool {
        self.passes(
            &item.node_path,
            &item.component_type,
            Some(&item.property_path),
        )
    }

    /// Filtered copy of a diff result, order preserved
    pub fn apply(&self, diff: &DiffResult) -> DiffResult {
        DiffResult {
            added: diff
                .added
                .iter()
                .filter(|i| self.passes_change(i))
                .cloned()
                .collect(),
            removed: diff
                .removed
                .iter()
                .filter(|i| self.passes_change(i))
                .cloned()
                .collect(),
            modified: diff
                .modified
                .iter()
                .filter(|i| self.passes_modified(i))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::NODE_ITEM_TYPE;

    fn change(node_path: &str, component_type: &str, property_path: Option<&str>) -> ChangeItem {
        ChangeItem {
            node_path: node_path.into(),
            component_type: component_type.into(),
            component_order: 0,
            property_path: property_path.map(Into::into),
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let filter = DiffFilter::default();
        assert!(filter.passes("Cube[0]", NODE_ITEM_TYPE, None));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let filter = DiffFilter {
            search: "INTENS".into(),
            ..Default::default()
        };
        assert!(filter.passes("Lamp[0]", "Light", Some("intensity")));
        assert!(!filter.passes("Lamp[0]", "Light", Some("range")));
        assert!(!filter.passes("Lamp[0]", "Light", None));

        let filter = DiffFilter {
            search: "lamp".into(),
            ..Default::default()
        };
        assert!(filter.passes("Lamp[0]", "Light", None));
    }

    #[test]
    fn tracked_paths_honor_include_children() {
        let mut filter = DiffFilter {
            tracked_paths: vec!["Root[0]".into()],
            ..Default::default()
        };
        assert!(filter.passes("Root[0]", "Light", None));
        assert!(filter.passes("Root[0]/Arm[1]", "Light", None));
        assert!(!filter.passes("Root[0]x", "Light", None));
        assert!(!filter.passes("Other[1]", "Light", None));

        filter.include_children = false;
        assert!(filter.passes("Root[0]", "Light", None));
        assert!(!filter.passes("Root[0]/Arm[1]", "Light", None));
    }

    #[test]
    fn apply_preserves_order() {
        let diff = DiffResult {
            added: vec![
                change("A[0]", "Light", None),
                change("B[1]", "Light", None),
                change("A[0]/C[0]", "Camera", None),
            ],
            removed: Vec::new(),
            modified: Vec::new(),
        };
        let filter = DiffFilter {
            tracked_paths: vec!["A[0]".into()],
            ..Default::default()
        };
        let filtered = filter.apply(&diff);
        let paths: Vec<&str> = filtered.added.iter().map(|i| i.node_path.as_str()).collect();
        assert_eq!(paths, ["A[0]", "A[0]/C[0]"]);
    }
}
