//! Diff export formats
//!
//! Two renderings of a [`DiffResult`]: pretty JSON for lossless round
//! trips, and a Markdown report for humans. Both are pure functions of the
//! diff value, so equal inputs produce byte-identical output.

use crate::diff::{ChangeItem, DiffResult, ModifiedItem};
use std::fmt::Write;

/// Lossless JSON rendering
pub fn to_json(diff: &DiffResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(diff)
}

fn change_line(item: &ChangeItem) -> String {
    match &item.property_path {
        Some(prop) => format!(
            "{} ({}) :: {}",
            item.node_path, item.component_type, prop
        ),
        None => format!("{} ({})", item.node_path, item.component_type),
    }
}

fn modified_line(item: &ModifiedItem) -> String {
    format!(
        "{} ({}) {}: `{}` → `{}`",
        item.node_path, item.component_type, item.property_path, item.before, item.after
    )
}

/// Human-readable Markdown report
pub fn to_markdown(diff: &DiffResult, scene_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Scene Diff — {scene_name}");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "**Added:** {} | **Removed:** {} | **Modified:** {}",
        diff.added.len(),
        diff.removed.len(),
        diff.modified.len()
    );
    let _ = writeln!(out);

    let mut section = |title: &str, lines: Vec<String>| {
        let _ = writeln!(out, "## {title}");
        for line in lines {
            let _ = writeln!(out, "- {line}");
        }
        let _ = writeln!(out);
    };

    section("Added", diff.added.iter().map(change_line).collect());
    section("Removed", diff.removed.iter().map(change_line).collect());
    section("Modified", diff.modified.iter().map(modified_line).collect());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{NODE_ITEM_ORDER, NODE_ITEM_TYPE};

    fn demo_diff() -> DiffResult {
        DiffResult {
            added: vec![ChangeItem {
                node_path: "Sphere[1]".into(),
                component_type: NODE_ITEM_TYPE.into(),
                component_order: NODE_ITEM_ORDER,
                property_path: None,
            }],
            removed: vec![ChangeItem {
                node_path: "Rig[0]".into(),
                component_type: "Light".into(),
                component_order: 1,
                property_path: Some("intensity".into()),
            }],
            modified: vec![ModifiedItem {
                node_path: "Cube[0]".into(),
                component_type: "Transform".into(),
                component_order: 0,
                property_path: "local_position".into(),
                before: "(0.000000,0.000000,0.000000)".into(),
                after: "(1.000000,0.000000,0.000000)".into(),
            }],
        }
    }

    #[test]
    fn markdown_report_layout() {
        let report = to_markdown(&demo_diff(), "demo");
        let expected = "\
# Scene Diff — demo

**Added:** 1 | **Removed:** 1 | **Modified:** 1

## Added
- Sphere[1] ((GameObject))

## Removed
- Rig[0] (Light) :: intensity

## Modified
- Cube[0] (Transform) local_position: `(0.000000,0.000000,0.000000)` → `(1.000000,0.000000,0.000000)`
";
        assert_eq!(report, expected);
    }

    #[test]
    fn exports_are_deterministic() {
        let diff = demo_diff();
        assert_eq!(to_markdown(&diff, "demo"), to_markdown(&diff, "demo"));
        assert_eq!(to_json(&diff).unwrap(), to_json(&diff).unwrap());
    }

    #[test]
    fn json_round_trips() {
        let diff = demo_diff();
        let json = to_json(&diff).unwrap();
        let back: DiffResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diff);
    }
}
