use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};

use crate::{
    config::{ConsoleConfig, Credentials},
    resource_tree::{DisplayRow, NodePath},
};

/// The node the property grid is showing.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    /// Where the node was in the view tree when it was picked.
    pub path: NodePath,
    pub node: Value,
}

/// Everything the console displays, owned by `ResourceConsole`.
///
/// `total_tree` is the last successfully fetched and normalized tree and is
/// only ever replaced wholesale.  `view_tree` is `total_tree` narrowed by
/// `search_text`.  `rows` belong to `selection` and are replaced together with
/// it.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleViewState {
    pub rest_path: String,
    pub credentials: Credentials,
    pub depth: u32,
    pub search_text: String,
    pub total_tree: Vec<Value>,
    pub view_tree: Vec<Value>,
    pub selection: Option<Selection>,
    pub rows: Vec<DisplayRow>,
}

impl ConsoleViewState {
    pub fn from_config(config: &ConsoleConfig) -> ConsoleViewState {
        ConsoleViewState {
            rest_path: config.rest_path.clone(),
            credentials: config.credentials.clone(),
            depth: config.depth,
            search_text: String::new(),
            total_tree: vec![],
            view_tree: vec![],
            selection: None,
            rows: vec![],
        }
    }

    /// The selected node as 4-space indented JSON, for the raw view next to
    /// the grid.
    pub fn selected_json(&self) -> Option<String> {
        let selection = self.selection.as_ref()?;
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        selection.node.serialize(&mut ser).ok()?;
        String::from_utf8(buf).ok()
    }
}

impl Default for ConsoleViewState {
    fn default() -> Self {
        ConsoleViewState::from_config(&ConsoleConfig::default())
    }
}
