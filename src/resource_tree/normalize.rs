use serde_json::{Map, Value};
use tracing::warn;

/// Key under which the server nests child resources; also the child key the
/// tree display walks.
pub const SUBRESOURCES_KEY: &str = "subresources";
/// Key of a reference to another resource.
pub const RESOURCELINK_KEY: &str = "resourcelink";
/// Label given to every link object so the tree shows it as a link.
pub const RESOURCELINK_LABEL: &str = "Resourcelink";

/// Anything deeper than this is passed through untouched.  Server dumps are
/// bounded by the `depth` fetch parameter (100 by default), so hitting this
/// means the document isn't a resource tree.
pub const MAX_NORMALIZE_DEPTH: usize = 512;

/// The only two keys with structural meaning; everything else is data and is
/// just walked.
#[derive(Debug, PartialEq)]
enum NodeKey {
    Subresources,
    Resourcelink,
    Data,
}

impl NodeKey {
    fn classify(key: &str) -> NodeKey {
        match key {
            SUBRESOURCES_KEY => NodeKey::Subresources,
            RESOURCELINK_KEY => NodeKey::Resourcelink,
            _ => NodeKey::Data,
        }
    }
}

/// Reshape a raw resource document as returned by the REST interface into
/// the form the tree display wants:
///
/// - Each entry of a `subresources` list loses one layer of wrapping, so
///   `{"resource": {...}}` becomes `{...}`.
/// - Each `resourcelink` object is labelled `name: "Resourcelink"` with the
///   link target's name as its `value`.
///
/// Both rewrites happen before descending, so the recursion sees the
/// unwrapped children and reaches every depth once.  Missing names become
/// `null`; nothing here fails.
pub fn normalize(node: Value) -> Value {
    normalize_at_depth(node, 0)
}

fn normalize_at_depth(node: Value, depth: usize) -> Value {
    match node {
        Value::Object(_) | Value::Array(_) if depth >= MAX_NORMALIZE_DEPTH => {
            warn!(depth, "resource document too deep, leaving the rest as-is");
            node
        }
        Value::Object(map) => Value::Object(normalize_object(map, depth)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize_at_depth(item, depth + 1))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn normalize_object(map: Map<String, Value>, depth: usize) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| {
            let value = match (NodeKey::classify(&key), value) {
                (NodeKey::Subresources, Value::Array(items)) => {
                    Value::Array(items.into_iter().map(unwrap_subresource).collect())
                }
                (NodeKey::Resourcelink, Value::Object(link)) => {
                    Value::Object(label_resourcelink(link))
                }
                (_, value) => value,
            };
            let value = normalize_at_depth(value, depth + 1);
            (key, value)
        })
        .collect()
}

/// Drop the wrapper around a `subresources` entry.  The wrapper is expected to
/// have a single entry; if it has several, the last one wins.  Empty wrappers
/// and scalars stay put.
fn unwrap_subresource(item: Value) -> Value {
    match item {
        Value::Object(wrapper) => {
            if wrapper.is_empty() {
                return Value::Object(wrapper);
            }
            match wrapper.into_iter().last() {
                Some((_, inner)) => inner,
                None => Value::Object(Map::new()),
            }
        }
        Value::Array(mut items) => match items.pop() {
            Some(inner) => inner,
            None => Value::Array(items),
        },
        scalar => scalar,
    }
}

/// Label a link object.  The target's name comes from the nested
/// `resourcelink` object when there is one, otherwise from the object's own
/// `name` as the server sent it.
fn label_resourcelink(mut link: Map<String, Value>) -> Map<String, Value> {
    let target_name = match link.get(RESOURCELINK_KEY) {
        Some(Value::Object(target)) => target.get("name").cloned().unwrap_or(Value::Null),
        Some(_) => Value::Null,
        None => link.get("name").cloned().unwrap_or(Value::Null),
    };
    link.insert("name".to_string(), Value::String(RESOURCELINK_LABEL.to_string()));
    link.insert("value".to_string(), target_name);
    link
}
