use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, to_string_pretty, Value};
use std::fmt::Debug;
use tracing::{trace, trace_span, Instrument};

pub use crate::abstract_gateway::{ResourceGateway, Result};
use crate::resource_tree::DisplayRow;

/// A document exactly as the gateway returned it, or any other lone JSON
/// value.
#[derive(Serialize)]
pub struct JsonValue {
    pub value: Value,
}

/// The roots of a normalized (and possibly filtered) resource tree.
#[derive(Serialize)]
pub struct ResourceTree {
    pub roots: Vec<Value>,
}

/// A node picked out of a `ResourceTree`, along with the path it was picked
/// by.
#[derive(Serialize)]
pub struct SelectedNode {
    pub path: String,
    pub node: Value,
}

/// Property grid rows for a selected node.
#[derive(Serialize)]
pub struct DisplayRowList {
    pub rows: Vec<DisplayRow>,
}

#[derive(Serialize)]
pub enum PipelineValues {
    JsonValue(JsonValue),
    ResourceTree(ResourceTree),
    SelectedNode(SelectedNode),
    DisplayRowList(DisplayRowList),
    Void,
}

impl PipelineValues {
    /// The payload on its own, which is what gets printed and snapshotted.
    pub fn into_json(self) -> Option<Value> {
        match self {
            PipelineValues::JsonValue(jv) => Some(jv.value),
            PipelineValues::ResourceTree(rt) => Some(Value::Array(rt.roots)),
            PipelineValues::SelectedNode(sn) => Some(sn.node),
            PipelineValues::DisplayRowList(drl) => Some(json!(drl.rows)),
            PipelineValues::Void => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PipelineValues::JsonValue(_) => "json-value",
            PipelineValues::ResourceTree(_) => "resource-tree",
            PipelineValues::SelectedNode(_) => "selected-node",
            PipelineValues::DisplayRowList(_) => "display-rows",
            PipelineValues::Void => "void",
        }
    }
}

/// A command that takes a single input and produces a single output.  At the
/// start of the pipeline, the input may be ignored / expected to be void.
#[async_trait]
pub trait PipelineCommand: Debug {
    async fn execute(
        &self,
        gateway: &(dyn ResourceGateway + Send + Sync),
        input: PipelineValues,
    ) -> Result<PipelineValues>;
}

pub struct ServerPipeline {
    /// "remote" or "local", for logging.
    pub gateway_kind: String,
    pub gateway: Box<dyn ResourceGateway + Send + Sync>,
    pub commands: Vec<Box<dyn PipelineCommand + Send + Sync>>,
}

impl ServerPipeline {
    pub async fn run(&self, traced: bool) -> Result<PipelineValues> {
        let mut cur_values = PipelineValues::Void;

        for cmd in &self.commands {
            let span = trace_span!("run_pipeline_step", cmd = ?cmd);

            match cmd
                .execute(self.gateway.as_ref(), cur_values)
                .instrument(span.clone())
                .await
            {
                Ok(next_values) => {
                    cur_values = next_values;
                }
                Err(err) => {
                    trace!(err = ?err);
                    return Err(err);
                }
            }

            let _span_guard = span.entered();
            if traced {
                if let Ok(value_str) = to_string_pretty(&cur_values) {
                    trace!(output_json = %value_str);
                }
            }
        }

        Ok(cur_values)
    }
}
