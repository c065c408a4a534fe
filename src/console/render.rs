use itertools::Itertools;
use serde_json::Value;

use crate::resource_tree::{display_value, DisplayRow, NodePath, SUBRESOURCES_KEY};

fn node_label(node: &Value) -> String {
    match node.get("name") {
        Some(name) => display_value(name),
        None => "(unnamed)".to_string(),
    }
}

fn render_node(out: &mut Vec<String>, node: &Value, path: &NodePath) {
    out.push(format!(
        "{}{}  {}",
        "  ".repeat(path.depth() - 1),
        path,
        node_label(node)
    ));
    if let Some(children) = node.get(SUBRESOURCES_KEY).and_then(Value::as_array) {
        for (i, child) in children.iter().enumerate() {
            render_node(out, child, &path.child(i));
        }
    }
}

/// The tree as indented lines of `PATH  NAME`; the paths are what `select`
/// takes.
pub fn render_tree(roots: &[Value]) -> String {
    let mut out = vec![];
    for (i, root) in roots.iter().enumerate() {
        render_node(&mut out, root, &NodePath::root(i));
    }
    out.join("\n")
}

/// The property grid.  Editable rows are marked with `*` and rows whose cells
/// can't be selected with `-`.
pub fn render_rows(rows: &[DisplayRow]) -> String {
    let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0).max(4);
    let header = format!("    {:<width$}  Value", "Name", width = width);
    let lines = rows.iter().enumerate().map(|(i, row)| {
        let marker = if row.is_editable() {
            '*'
        } else if !row.is_selectable() {
            '-'
        } else {
            ' '
        };
        format!(
            "{:>2}{} {:<width$}  {}",
            i,
            marker,
            row.name,
            display_value(&row.value),
            width = width
        )
    });
    std::iter::once(header).chain(lines).join("\n")
}
