use async_trait::async_trait;
use clap::Args;

use super::interface::{PipelineCommand, PipelineValues, ResourceTree};
use crate::{
    abstract_gateway::{ResourceGateway, Result},
    resource_tree::{normalize, tree_roots},
};

/// Reshape a fetched resource document into a tree: one layer of wrapping is
/// removed from every `subresources` entry and every `resourcelink` is
/// labelled with its target's name.
#[derive(Debug, Args)]
pub struct Normalize {}

#[allow(dead_code)]
#[derive(Debug)]
pub struct NormalizeCommand {
    pub args: Normalize,
}

#[async_trait]
impl PipelineCommand for NormalizeCommand {
    async fn execute(
        &self,
        _gateway: &(dyn ResourceGateway + Send + Sync),
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        Ok(match input {
            PipelineValues::JsonValue(jv) => PipelineValues::ResourceTree(ResourceTree {
                roots: tree_roots(normalize(jv.value)),
            }),
            // Normalizing twice is not a no-op (entries would get unwrapped
            // again), so a tree is passed through as-is.
            other => other,
        })
    }
}
