use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::normalize::SUBRESOURCES_KEY;

/// Keys that describe tree structure or display bookkeeping rather than
/// properties of the resource.  `$$hashKey` is what browser-side tree widgets
/// stamp onto nodes; dumps saved from such a console carry it.
pub const STRUCTURAL_KEYS: &[&str] = &["$$hashKey", SUBRESOURCES_KEY];

/// Only these rows accept edits in the property grid.
pub const EDITABLE_ROW_NAMES: &[&str] = &["active", "value"];

/// Rows whose cells can't be selected at all.
pub const UNSELECTABLE_ROW_NAMES: &[&str] = &["referencing", "decorating"];

/// One line of the property grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayRow {
    pub name: String,
    pub value: Value,
}

impl DisplayRow {
    pub fn is_editable(&self) -> bool {
        EDITABLE_ROW_NAMES.contains(&self.name.as_str())
    }

    pub fn is_selectable(&self) -> bool {
        !UNSELECTABLE_ROW_NAMES.contains(&self.name.as_str())
    }
}

/// Project the selected node onto property grid rows, one per key in the
/// node's own order, skipping the structural keys.  Values are passed through
/// as-is; turning them into text is `display_value`'s job.
pub fn project(node: &Value) -> Vec<DisplayRow> {
    let map = match node.as_object() {
        Some(map) => map,
        None => return vec![],
    };

    map.iter()
        .filter(|(key, _)| !STRUCTURAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| DisplayRow {
            name: key.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Text for a grid cell: strings without quotes, everything else as compact
/// JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The grid's sort: name ascending, then value descending.
pub fn sort_rows(rows: &mut [DisplayRow]) {
    rows.sort_by(|a, b| match a.name.cmp(&b.name) {
        Ordering::Equal => display_value(&b.value).cmp(&display_value(&a.value)),
        other => other,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(name: &str, value: Value) -> DisplayRow {
        DisplayRow {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn skips_structural_keys_and_keeps_order() {
        let node = json!({"id": "1", "subresources": [], "active": true});
        assert_eq!(
            project(&node),
            vec![row("id", json!("1")), row("active", json!(true))]
        );
    }

    #[test]
    fn drops_hash_key_and_keeps_nested_values() {
        let node = json!({
            "$$hashKey": "object:12",
            "name": "Resourcelink",
            "value": "thermostat",
            "resourcelink": {"name": "thermostat"},
        });
        assert_eq!(
            project(&node),
            vec![
                row("name", json!("Resourcelink")),
                row("value", json!("thermostat")),
                row("resourcelink", json!({"name": "thermostat"})),
            ]
        );
    }

    #[test]
    fn non_objects_project_to_nothing() {
        assert!(project(&json!([1, 2])).is_empty());
        assert!(project(&json!("x")).is_empty());
        assert!(project(&Value::Null).is_empty());
    }

    #[test]
    fn editable_and_selectable_rows() {
        assert!(row("active", json!(true)).is_editable());
        assert!(row("value", json!(21.5)).is_editable());
        assert!(!row("name", json!("x")).is_editable());

        assert!(!row("referencing", json!([])).is_selectable());
        assert!(!row("decorating", json!(false)).is_selectable());
        assert!(row("path", json!("a/b")).is_selectable());
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!("plain")), "plain");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&Value::Null), "null");
        assert_eq!(display_value(&json!({"a": [1]})), r#"{"a":[1]}"#);
    }

    #[test]
    fn sorts_by_name_then_value_descending() {
        let mut rows = vec![
            row("value", json!(1)),
            row("active", json!(true)),
            row("value", json!(2)),
        ];
        sort_rows(&mut rows);
        assert_eq!(
            rows,
            vec![
                row("active", json!(true)),
                row("value", json!(2)),
                row("value", json!(1)),
            ]
        );
    }
}
