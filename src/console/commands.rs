use clap::{Parser, Subcommand};
use serde_json::Value;

use super::controller::ConsoleEvent;
use crate::{
    abstract_gateway::{Result, ServerError},
    config::Credentials,
    resource_tree::NodePath,
};

/// One line typed at the interactive console.
#[derive(Debug, Parser)]
#[clap(no_binary_name = true, name = "resource-console")]
pub struct ConsoleLine {
    #[clap(subcommand)]
    pub cmd: ConsoleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsoleCommand {
    /// Change the resource path and fetch it.
    Path {
        #[clap(value_parser)]
        rest_path: String,
    },
    /// Change the REST credentials and fetch again.
    Login {
        #[clap(value_parser)]
        user: String,
        #[clap(value_parser)]
        password: String,
    },
    /// Fetch the current path again.
    Refresh,
    /// Only show roots whose name contains TEXT; without TEXT show everything.
    Search {
        #[clap(value_parser)]
        text: Option<String>,
    },
    /// Show a node's properties in the grid, e.g. `select 0/2/1`.
    Select {
        #[clap(value_parser)]
        path: NodePath,
    },
    /// Edit an `active` or `value` row of the grid.  VALUE is read as JSON if
    /// it parses and as a string otherwise.
    Edit {
        #[clap(value_parser)]
        row: usize,
        #[clap(value_parser)]
        value: String,
    },
    /// Print the displayed tree.
    Tree,
    /// Print the property grid.
    Rows {
        /// Sort by name, then by value descending.
        #[clap(long, short, value_parser)]
        sorted: bool,
    },
    /// Print the selected node as JSON.
    Json,
    Quit,
}

/// What the console loop should do with a line.
#[derive(Debug, PartialEq)]
pub enum ConsoleAction {
    Event(ConsoleEvent),
    ShowTree,
    ShowRows { sorted: bool },
    ShowJson,
    Quit,
}

fn edit_value(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(_) => Value::String(raw),
    }
}

impl From<ConsoleCommand> for ConsoleAction {
    fn from(cmd: ConsoleCommand) -> ConsoleAction {
        match cmd {
            ConsoleCommand::Path { rest_path } => {
                ConsoleAction::Event(ConsoleEvent::PathChanged(rest_path))
            }
            ConsoleCommand::Login { user, password } => {
                ConsoleAction::Event(ConsoleEvent::CredentialsChanged(Credentials {
                    user,
                    password,
                }))
            }
            ConsoleCommand::Refresh => ConsoleAction::Event(ConsoleEvent::Refresh),
            ConsoleCommand::Search { text } => {
                ConsoleAction::Event(ConsoleEvent::SearchChanged(text.unwrap_or_default()))
            }
            ConsoleCommand::Select { path } => {
                ConsoleAction::Event(ConsoleEvent::NodeSelected(path))
            }
            ConsoleCommand::Edit { row, value } => ConsoleAction::Event(ConsoleEvent::CellEdited {
                row,
                value: edit_value(value),
            }),
            ConsoleCommand::Tree => ConsoleAction::ShowTree,
            ConsoleCommand::Rows { sorted } => ConsoleAction::ShowRows { sorted },
            ConsoleCommand::Json => ConsoleAction::ShowJson,
            ConsoleCommand::Quit => ConsoleAction::Quit,
        }
    }
}

/// Parse a console line with shell quoting rules.  Blank lines are `None`.
/// A `help` request comes back as a `BadInput` error whose message is the help
/// text.
pub fn parse_console_line(line: &str) -> Result<Option<ConsoleAction>> {
    let words = shell_words::split(line).map_err(|err| ServerError::bad_input(err.to_string()))?;
    if words.is_empty() {
        return Ok(None);
    }

    let parsed = ConsoleLine::try_parse_from(words)
        .map_err(|err| ServerError::bad_input(err.to_string()))?;
    Ok(Some(parsed.cmd.into()))
}
