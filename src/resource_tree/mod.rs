//! The display-side model of a resource tree: reshaping the server's document,
//! narrowing it by name, addressing nodes in it and turning a node into
//! property grid rows.  Everything here is a pure function of its inputs.

mod filter;
mod node_path;
mod normalize;
mod project;

pub use filter::{filter_roots, tree_roots};
pub use node_path::NodePath;
pub use normalize::{
    normalize, MAX_NORMALIZE_DEPTH, RESOURCELINK_KEY, RESOURCELINK_LABEL, SUBRESOURCES_KEY,
};
pub use project::{
    display_value, project, sort_rows, DisplayRow, EDITABLE_ROW_NAMES, STRUCTURAL_KEYS,
    UNSELECTABLE_ROW_NAMES,
};
