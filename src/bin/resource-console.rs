//! Interactive resource browser.  Fetches the resource tree on startup and
//! then reads commands from stdin, one per line; `help` lists them.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use resource_admin::{
    abstract_gateway::make_gateway,
    config,
    console::{
        parse_console_line, render_rows, render_tree, ConsoleAction, ConsoleEvent,
        ConsoleViewState, ResourceConsole,
    },
    logging::init_logging,
    resource_tree::sort_rows,
};

#[derive(Debug, Parser)]
#[clap(name = "resource-console")]
struct ConsoleOpts {
    /// URL of the administration server, or the path to a JSON dump of its
    /// resources.
    #[clap(long, value_parser, env = "RESOURCE_ADMIN_SERVER")]
    server: Option<String>,

    /// TOML file with the server, credentials and fetch defaults.
    #[clap(long, value_parser, env = "RESOURCE_ADMIN_CONFIG")]
    config: Option<String>,

    #[clap(long, value_parser, env = "RESOURCE_ADMIN_USER")]
    user: Option<String>,

    #[clap(long, value_parser, env = "RESOURCE_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Resource path to start at.
    #[clap(long, value_parser)]
    rest_path: Option<String>,

    #[clap(long, value_parser)]
    depth: Option<u32>,
}

fn print_tree(console: &ResourceConsole) {
    let state = console.state();
    if state.view_tree.is_empty() {
        println!("(no resources)");
    } else {
        println!("{}", render_tree(&state.view_tree));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let opts = ConsoleOpts::parse();
    let mut config = match config::resolve(opts.config.as_deref(), opts.server, opts.user, opts.password) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Bad configuration: {}", err);
            std::process::exit(2);
        }
    };
    if let Some(rest_path) = opts.rest_path {
        config.rest_path = rest_path;
    }
    if let Some(depth) = opts.depth {
        config.depth = depth;
    }

    let (gateway_kind, gateway) = match make_gateway(&config.server) {
        Ok(made) => made,
        Err(err) => {
            eprintln!("Can't reach resources: {}", err);
            std::process::exit(2);
        }
    };

    let mut console = ResourceConsole::new(gateway, ConsoleViewState::from_config(&config));
    println!("Resources from {} ({})", console.gateway_description(), gateway_kind);
    match console.refresh().await {
        Ok(()) => print_tree(&console),
        Err(err) => println!("Fetch failed: {}", err),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                eprintln!("Reading stdin failed: {}", err);
                break;
            }
        };

        let action = match parse_console_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match action {
            ConsoleAction::Quit => break,
            ConsoleAction::ShowTree => print_tree(&console),
            ConsoleAction::ShowRows { sorted } => {
                let mut rows = console.state().rows.clone();
                if sorted {
                    sort_rows(&mut rows);
                }
                println!("{}", render_rows(&rows));
            }
            ConsoleAction::ShowJson => match console.state().selected_json() {
                Some(json) => println!("{}", json),
                None => println!("Nothing selected."),
            },
            ConsoleAction::Event(event) => {
                let shows_grid = matches!(
                    event,
                    ConsoleEvent::NodeSelected(_) | ConsoleEvent::CellEdited { .. }
                );
                match console.handle(event).await {
                    Ok(()) if shows_grid => println!("{}", render_rows(&console.state().rows)),
                    Ok(()) => print_tree(&console),
                    Err(err) => println!("{}", err),
                }
            }
        }
    }
}
