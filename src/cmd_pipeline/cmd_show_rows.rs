use async_trait::async_trait;
use clap::Args;

use super::interface::{DisplayRowList, PipelineCommand, PipelineValues};
use crate::{
    abstract_gateway::{ResourceGateway, Result, ServerError},
    resource_tree::{project, sort_rows},
};

/// Turn the selected node into property grid rows.
#[derive(Debug, Args)]
pub struct ShowRows {
    /// Sort by name, then by value descending, instead of property order.
    #[clap(long, short, value_parser)]
    sorted: bool,
}

#[derive(Debug)]
pub struct ShowRowsCommand {
    pub args: ShowRows,
}

#[async_trait]
impl PipelineCommand for ShowRowsCommand {
    async fn execute(
        &self,
        _gateway: &(dyn ResourceGateway + Send + Sync),
        input: PipelineValues,
    ) -> Result<PipelineValues> {
        let mut rows = match input {
            PipelineValues::SelectedNode(sn) => project(&sn.node),
            PipelineValues::JsonValue(jv) => project(&jv.value),
            other => {
                return Err(ServerError::bad_input(format!(
                    "show-rows needs a single node, got {}",
                    other.kind()
                )))
            }
        };

        if self.args.sorted {
            sort_rows(&mut rows);
        }

        Ok(PipelineValues::DisplayRowList(DisplayRowList { rows }))
    }
}
