use clap::Parser;
use tracing::{trace, trace_span};

use super::{
    cmd_fetch_resources::FetchResourcesCommand,
    cmd_filter_tree::FilterTreeCommand,
    cmd_normalize::NormalizeCommand,
    cmd_select::SelectCommand,
    cmd_show_rows::ShowRowsCommand,
    interface::{PipelineCommand, ServerPipeline},
    parser::{Command, OutputFormat, ToolOpts},
};
use crate::{
    abstract_gateway::{make_gateway, Result, ServerError},
    config::{self, ConsoleConfig},
};

pub fn fab_command_from_opts(
    opts: ToolOpts,
    config: &ConsoleConfig,
) -> Result<Box<dyn PipelineCommand + Send + Sync>> {
    match opts.cmd {
        Command::FetchResources(fr) => Ok(Box::new(FetchResourcesCommand {
            args: fr,
            config: config.clone(),
        })),

        Command::FilterTree(ft) => Ok(Box::new(FilterTreeCommand { args: ft })),

        Command::Normalize(n) => Ok(Box::new(NormalizeCommand { args: n })),

        Command::Select(s) => Ok(Box::new(SelectCommand { args: s })),

        Command::ShowRows(sr) => Ok(Box::new(ShowRowsCommand { args: sr })),
    }
}

/// Build a command pipeline from a shell-y string where we use pipe boundaries
/// to delineate the separate pipeline steps.
///
/// The shell-words module is used to parse `arg_str` into shell words, which we
/// then break into separate sub-commands whenever we see a `|`.  We then pass
/// these sub-commands to clap's `try_parse_from`, taking care to stuff our
/// binary name into the first arg.  Server, credential and output options are
/// only looked at in the first sub-command.
pub fn build_pipeline(bin_name: &str, arg_str: &str) -> Result<(ServerPipeline, OutputFormat)> {
    let span = trace_span!("build_pipeline", arg_str);
    let _span_guard = span.enter();

    let all_args = shell_words::split(arg_str).map_err(|err| ServerError::bad_input(err.to_string()))?;

    let mut pipeline_setup = None;
    let mut commands: Vec<Box<dyn PipelineCommand + Send + Sync>> = vec![];

    for arg_slices in all_args.split(|v| v == "|") {
        let mut fake_args = vec![bin_name.to_string()];
        fake_args.extend(arg_slices.iter().cloned());

        let opts = ToolOpts::try_parse_from(fake_args)
            .map_err(|err| ServerError::bad_input(err.to_string()))?;

        if pipeline_setup.is_none() {
            let config = config::resolve(
                opts.config.as_deref(),
                opts.server.clone(),
                opts.user.clone(),
                opts.password.clone(),
            )?;
            let (gateway_kind, gateway) = make_gateway(&config.server)?;
            pipeline_setup = Some((gateway_kind, gateway, opts.output_format.clone(), config));
        }

        trace!(cmd = ?opts.cmd);
        if let Some((_, _, _, config)) = &pipeline_setup {
            commands.push(fab_command_from_opts(opts, config)?);
        }
    }

    match pipeline_setup {
        Some((gateway_kind, gateway, output_format, _)) => Ok((
            ServerPipeline {
                gateway_kind: gateway_kind.to_string(),
                gateway,
                commands,
            },
            output_format,
        )),
        None => Err(ServerError::bad_input("empty pipeline")),
    }
}
