use async_trait::async_trait;
use clap::Args;

use super::interface::{JsonValue, PipelineCommand, PipelineValues};
use crate::{
    abstract_gateway::{ResourceGateway, Result},
    config::{fetch_params, ConsoleConfig},
};

/// Fetch the raw resource document.  Defaults come from the configuration.
#[derive(Debug, Args)]
pub struct FetchResources {
    /// Resource path, e.g. `/rest/resources/` or `/rest/resources/heatPump`.
    #[clap(long, value_parser)]
    path: Option<String>,

    /// How many levels of subresources the server should expand.
    #[clap(long, short, value_parser)]
    depth: Option<u32>,
}

#[derive(Debug)]
pub struct FetchResourcesCommand {
    pub args: FetchResources,
    pub config: ConsoleConfig,
}

#[async_trait]
impl PipelineCommand for FetchResourcesCommand {
    async fn execute(
        &self,
        gateway: &(dyn ResourceGateway + Send + Sync),
        _input: PipelineValues,
    ) -> Result<PipelineValues> {
        let path = self.args.path.as_ref().unwrap_or(&self.config.rest_path);
        let depth = self.args.depth.unwrap_or(self.config.depth);
        let params = fetch_params(&self.config.credentials, depth);

        let value = gateway.fetch_json(path, &params).await?;
        Ok(PipelineValues::JsonValue(JsonValue { value }))
    }
}
