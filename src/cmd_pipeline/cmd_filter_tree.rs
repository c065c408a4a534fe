use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues, ResourceTree};
use crate::{
    abstract_gateway::{ResourceGateway, Result, ServerError},
    resource_tree::{filter_roots, tree_roots},
};

/// Keep the roots whose name contains the search text, ignoring case.
#[derive(Debug, Args)]
pub struct FilterTree {
    /// Text to look for in root names; empty keeps everything.
    #[clap(value_parser, default_value = "")]
    search: String,
}

#[derive(Debug)]
pub struct FilterTreeCommand {
    pub args: FilterTree,
}

#[async_trait]
impl PipelineCommand for FilterTreeCommand {
    async fn execute(
        &self,
        _gateway: &(dyn ResourceGateway + Send + Sync),
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let roots = match input {
            PipelineValues::ResourceTree(rt) => rt.roots,
            // Filtering un-normalized data is fine too; names don't move.
            PipelineValues::JsonValue(jv) => tree_roots(jv.value),
            other => {
                return Err(ServerError::bad_input(format!(
                    "filter-tree needs a tree, got {}",
                    other.kind()
                )))
            }
        };

        Ok(PipelineValues::ResourceTree(ResourceTree {
            roots: filter_roots(&roots, &self.args.search),
        }))
    }
}
