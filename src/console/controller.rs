use serde_json::Value;
use tracing::{info, trace_span, warn, Instrument};

use super::view_state::{ConsoleViewState, Selection};
use crate::{
    abstract_gateway::{ResourceGateway, Result, ServerError},
    config::{fetch_params, Credentials},
    resource_tree::{filter_roots, normalize, project, tree_roots, DisplayRow, NodePath},
};

/// Things that happen at the console.  Path and credential changes trigger a
/// fetch; the rest recompute from what is already held.
#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleEvent {
    PathChanged(String),
    CredentialsChanged(Credentials),
    Refresh,
    SearchChanged(String),
    NodeSelected(NodePath),
    CellEdited { row: usize, value: Value },
}

/// Ties a gateway to the view state.  All mutation goes through `&mut self`
/// and a fetch is awaited before the next event is handled, so a slow
/// response can never land on top of a newer one.
pub struct ResourceConsole {
    gateway: Box<dyn ResourceGateway + Send + Sync>,
    state: ConsoleViewState,
}

impl ResourceConsole {
    pub fn new(
        gateway: Box<dyn ResourceGateway + Send + Sync>,
        state: ConsoleViewState,
    ) -> ResourceConsole {
        ResourceConsole { gateway, state }
    }

    pub fn state(&self) -> &ConsoleViewState {
        &self.state
    }

    pub fn gateway_description(&self) -> String {
        self.gateway.describe()
    }

    /// Fetch the tree at the current path and make it the displayed tree.
    ///
    /// On failure the error is logged and returned, and nothing that is
    /// displayed changes.
    pub async fn refresh(&mut self) -> Result<()> {
        let params = fetch_params(&self.state.credentials, self.state.depth);
        let span = trace_span!("refresh", path = %self.state.rest_path);

        let raw = match self
            .gateway
            .fetch_json(&self.state.rest_path, &params)
            .instrument(span)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %self.state.rest_path, %err, "resource fetch failed, keeping the current tree");
                return Err(err);
            }
        };

        let total = tree_roots(normalize(raw));
        info!(path = %self.state.rest_path, roots = total.len(), "resource tree loaded");

        self.state.search_text.clear();
        self.state.view_tree = total.clone();
        self.state.total_tree = total;
        self.state.selection = None;
        self.state.rows.clear();
        Ok(())
    }

    pub async fn set_rest_path(&mut self, rest_path: String) -> Result<()> {
        self.state.rest_path = rest_path;
        self.refresh().await
    }

    pub async fn set_credentials(&mut self, credentials: Credentials) -> Result<()> {
        self.state.credentials = credentials;
        self.refresh().await
    }

    /// Narrow the displayed tree.  The grid keeps showing whatever was
    /// selected.
    pub fn set_search(&mut self, search: &str) {
        self.state.search_text = search.to_string();
        self.state.view_tree = filter_roots(&self.state.total_tree, search);
    }

    /// Select a node of the displayed tree, replacing the grid rows.
    pub fn select(&mut self, path: &NodePath) -> Result<&[DisplayRow]> {
        let node = match path.resolve(&self.state.view_tree) {
            Some(node) => node.clone(),
            None => {
                return Err(ServerError::bad_input(format!(
                    "no node at {} in the displayed tree",
                    path
                )))
            }
        };

        self.state.rows = project(&node);
        self.state.selection = Some(Selection {
            path: path.clone(),
            node,
        });
        Ok(self.state.rows.as_slice())
    }

    /// Whether the cell in the given grid row can be selected.
    pub fn check_selected_cell(&self, row: usize) -> bool {
        self.state
            .rows
            .get(row)
            .map_or(false, DisplayRow::is_selectable)
    }

    /// Accept an edit to a grid cell.  Only `active` and `value` rows take
    /// edits and they only change what is displayed; nothing is written back.
    pub fn commit_edit(&mut self, row: usize, value: Value) -> Result<()> {
        let display_row = match self.state.rows.get_mut(row) {
            Some(display_row) => display_row,
            None => return Err(ServerError::bad_input(format!("no grid row {}", row))),
        };
        if !display_row.is_editable() {
            return Err(ServerError::bad_input(format!(
                "row {} ({}) is read-only",
                row, display_row.name
            )));
        }

        display_row.value = value;
        Ok(())
    }

    pub async fn handle(&mut self, event: ConsoleEvent) -> Result<()> {
        match event {
            ConsoleEvent::PathChanged(rest_path) => self.set_rest_path(rest_path).await,
            ConsoleEvent::CredentialsChanged(credentials) => {
                self.set_credentials(credentials).await
            }
            ConsoleEvent::Refresh => self.refresh().await,
            ConsoleEvent::SearchChanged(search) => {
                self.set_search(&search);
                Ok(())
            }
            ConsoleEvent::NodeSelected(path) => self.select(&path).map(|_| ()),
            ConsoleEvent::CellEdited { row, value } => self.commit_edit(row, value),
        }
    }
}
