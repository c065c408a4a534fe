mod commands;
mod controller;
mod render;
mod view_state;

pub use commands::{parse_console_line, ConsoleAction, ConsoleCommand, ConsoleLine};
pub use controller::{ConsoleEvent, ResourceConsole};
pub use render::{render_rows, render_tree};
pub use view_state::{ConsoleViewState, Selection};
