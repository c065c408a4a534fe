use std::env::args_os;

use resource_admin::{
    cmd_pipeline::{build_pipeline, parser::OutputFormat},
    logging::init_logging,
};
use serde_json::to_string_pretty;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let os_args: Vec<String> = args_os()
        .map(|os| os.into_string().unwrap_or("".to_string()))
        .collect();

    let bin_name = os_args.get(0).map_or("resource-tool", String::as_str);
    let arg_str = match os_args.get(1) {
        Some(arg_str) => arg_str,
        None => {
            eprintln!(
                "Usage: {} '[--server URL|DUMP] fetch-resources | normalize | filter-tree TEXT | select 0/1 | show-rows'",
                bin_name
            );
            std::process::exit(2);
        }
    };

    let (pipeline, output_format) = match build_pipeline(bin_name, arg_str) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("You did not specify a good pipeline!\n{}", err);
            std::process::exit(2);
        }
    };

    let result = match pipeline.run(true).await {
        Ok(result) => result,
        Err(err) => {
            eprintln!("Pipeline Error!");
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    match result.into_json() {
        None => {
            println!("Void result.");
        }
        Some(value) => {
            if output_format == OutputFormat::Concise {
                println!("{}", value);
            } else if let Ok(pretty) = to_string_pretty(&value) {
                println!("{}", pretty);
            }
        }
    }
}
