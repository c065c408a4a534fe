use serde_json::Value;

/// The tree display shows a list of roots.  The REST interface answers
/// `/rest/resources/` with a list, but a single resource path gives back one
/// object, which is then the only root.
pub fn tree_roots(doc: Value) -> Vec<Value> {
    match doc {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => vec![],
    }
}

/// Roots whose `name` contains `search`, ignoring case.  Matching roots keep
/// their whole subtree; an empty search is the whole tree.
pub fn filter_roots(total: &[Value], search: &str) -> Vec<Value> {
    if search.is_empty() {
        return total.to_vec();
    }

    let needle = search.to_lowercase();
    total
        .iter()
        .filter(|node| name_matches(node, &needle))
        .cloned()
        .collect()
}

fn name_matches(node: &Value, needle: &str) -> bool {
    let name = match node.get("name") {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(n @ Value::Number(_)) => n.to_string(),
        Some(b @ Value::Bool(_)) => b.to_string(),
        _ => return false,
    };
    name.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn total() -> Vec<Value> {
        vec![
            json!({"name": "HeatPump", "subresources": [{"name": "power"}]}),
            json!({"name": "fridge_1"}),
            json!({"name": 42}),
            json!({"path": "unnamed"}),
        ]
    }

    #[test]
    fn empty_search_is_the_total_tree() {
        assert_eq!(filter_roots(&total(), ""), total());
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter_roots(&total(), "toaster").is_empty());
    }

    #[test]
    fn substring_match_ignores_case() {
        let view = filter_roots(&total(), "heat");
        assert_eq!(view, vec![total()[0].clone()]);
        let view = filter_roots(&total(), "PUMP");
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn only_roots_are_matched() {
        assert!(filter_roots(&total(), "power").is_empty());
    }

    #[test]
    fn numeric_names_match_their_text() {
        assert_eq!(filter_roots(&total(), "4"), vec![json!({"name": 42})]);
    }

    #[test]
    fn roots_of_documents() {
        assert_eq!(tree_roots(json!([{"name": "a"}])), vec![json!({"name": "a"})]);
        assert_eq!(tree_roots(json!({"name": "a"})), vec![json!({"name": "a"})]);
        assert!(tree_roots(json!("nope")).is_empty());
    }
}
