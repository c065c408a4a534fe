use clap::{Parser, Subcommand, ValueEnum};

use super::cmd_fetch_resources::FetchResources;
use super::cmd_filter_tree::FilterTree;
use super::cmd_normalize::Normalize;
use super::cmd_select::Select;
use super::cmd_show_rows::ShowRows;

#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Pretty,
    /// Un-pretty-printed JSON.
    Concise,
}

#[derive(Debug, Parser)]
#[clap(name = "resource-tool")]
pub struct ToolOpts {
    /// URL of the administration server to query, or the path to a JSON dump
    /// of its resources (a file, or a directory mirroring the REST paths).
    #[clap(long, value_parser, env = "RESOURCE_ADMIN_SERVER")]
    pub server: Option<String>,

    /// TOML file with the server, credentials and fetch defaults.
    #[clap(long, value_parser, env = "RESOURCE_ADMIN_CONFIG")]
    pub config: Option<String>,

    #[clap(long, value_parser, env = "RESOURCE_ADMIN_USER")]
    pub user: Option<String>,

    #[clap(long, value_parser, env = "RESOURCE_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[clap(long, short, value_enum, ignore_case = true, default_value = "concise")]
    pub output_format: OutputFormat,

    #[clap(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    FetchResources(FetchResources),
    FilterTree(FilterTree),
    Normalize(Normalize),
    Select(Select),
    ShowRows(ShowRows),
}
