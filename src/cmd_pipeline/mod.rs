pub mod builder;
pub mod interface;
pub mod parser;

mod cmd_fetch_resources;
mod cmd_filter_tree;
mod cmd_normalize;
mod cmd_select;
mod cmd_show_rows;

pub use builder::build_pipeline;
pub use interface::{PipelineCommand, PipelineValues};
