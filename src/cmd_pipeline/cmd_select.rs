use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues, SelectedNode};
use crate::{
    abstract_gateway::{ResourceGateway, Result, ServerError},
    resource_tree::NodePath,
};

/// Pick a node out of a tree by its path, `ROOT/CHILD/...` with each step an
/// index into `subresources`.
#[derive(Debug, Args)]
pub struct Select {
    #[clap(value_parser)]
    path: NodePath,
}

#[derive(Debug)]
pub struct SelectCommand {
    pub args: Select,
}

#[async_trait]
impl PipelineCommand for SelectCommand {
    async fn execute(
        &self,
        _gateway: &(dyn ResourceGateway + Send + Sync),
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let tree = match input {
            PipelineValues::ResourceTree(rt) => rt,
            other => {
                return Err(ServerError::bad_input(format!(
                    "select needs a resource tree, got {}",
                    other.kind()
                )))
            }
        };

        match self.args.path.resolve(&tree.roots) {
            Some(node) => Ok(PipelineValues::SelectedNode(SelectedNode {
                path: self.args.path.to_string(),
                node: node.clone(),
            })),
            None => Err(ServerError::bad_input(format!(
                "no node at {}",
                self.args.path
            ))),
        }
    }
}
