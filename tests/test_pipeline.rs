use resource_admin::{
    abstract_gateway::{ErrorDetails, ErrorLayer, ServerError},
    cmd_pipeline::{build_pipeline, PipelineValues},
};
use serde_json::{json, Value};

/// Pipelines run against the dumps under `tests/fixtures`, which mirror the
/// REST paths (`/rest/resources/` is `rest/resources.json`).
async fn run(pipeline: &str) -> Result<PipelineValues, ServerError> {
    let fixtures = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let command = format!("--server {} {}", shell_words::quote(&fixtures), pipeline);
    let (pipeline, _) = build_pipeline("resource-tool", &command)?;
    pipeline.run(true).await
}

async fn run_json(pipeline: &str) -> Value {
    run(pipeline).await.unwrap().into_json().unwrap()
}

fn names(roots: &Value) -> Vec<&str> {
    roots
        .as_array()
        .unwrap()
        .iter()
        .map(|root| root["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn rows_for_a_selected_subresource() {
    let rows = run_json("fetch-resources | normalize | select 0/0 | show-rows").await;
    insta::assert_json_snapshot!(rows, @r###"
    [
      {
        "name": "name",
        "value": "power"
      },
      {
        "name": "path",
        "value": "heatPump/power"
      },
      {
        "name": "type",
        "value": "org.example.model.sensors.PowerSensor"
      },
      {
        "name": "value",
        "value": 1200.5
      },
      {
        "name": "active",
        "value": true
      }
    ]
    "###);
}

#[tokio::test]
async fn link_rows_show_the_labelled_link() {
    let rows = run_json("fetch-resources | normalize | select 0/1 | show-rows --sorted").await;
    assert_eq!(
        rows,
        json!([
            {"name": "active", "value": true},
            {"name": "name", "value": "thermostat"},
            {"name": "path", "value": "heatPump/thermostat"},
            {"name": "referencing", "value": ["mainThermostat"]},
            {
                "name": "resourcelink",
                "value": {"name": "Resourcelink", "path": "mainThermostat", "value": "mainThermostat"},
            },
            {"name": "type", "value": "org.example.model.devices.Thermostat"},
        ])
    );
}

#[tokio::test]
async fn normalize_unwraps_every_level() {
    let tree = run_json("fetch-resources | normalize").await;
    assert_eq!(names(&tree), vec!["heatPump", "mainThermostat", "fridge"]);
    assert_eq!(tree[0]["subresources"][1]["name"], json!("thermostat"));
    assert_eq!(tree[1]["subresources"][0]["value"], json!(294.5));
    assert_eq!(tree[2]["subresources"], json!([]));
}

#[tokio::test]
async fn filter_by_name() {
    let tree = run_json("fetch-resources | normalize | filter-tree THERMO").await;
    assert_eq!(names(&tree), vec!["mainThermostat"]);

    let tree = run_json("fetch-resources | normalize | filter-tree").await;
    assert_eq!(names(&tree), vec!["heatPump", "mainThermostat", "fridge"]);

    let tree = run_json("fetch-resources | normalize | filter-tree toaster").await;
    assert_eq!(tree, json!([]));
}

#[tokio::test]
async fn selection_paths_are_relative_to_the_filtered_view() {
    let node = run_json("fetch-resources | normalize | filter-tree main | select 0/0").await;
    assert_eq!(node["name"], json!("setpoint"));
}

#[tokio::test]
async fn gzipped_single_resource() {
    let tree = run_json("fetch-resources --path /rest/resources/fridge | normalize").await;
    assert_eq!(
        tree,
        json!([{
            "name": "fridge",
            "path": "fridge",
            "type": "org.example.model.devices.Fridge",
            "active": false,
            "subresources": [
                {"name": "doorOpen", "path": "fridge/doorOpen", "value": false, "active": true, "subresources": []},
            ],
        }])
    );
}

#[tokio::test]
async fn raw_fetch_keeps_wrappers() {
    let raw = run_json("fetch-resources").await;
    assert!(raw[0]["subresources"][0]["resource"].is_object());
}

#[tokio::test]
async fn missing_node_is_bad_input() {
    match run("fetch-resources | normalize | select 2/0").await {
        Err(ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            ..
        })) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
        Ok(_) => panic!("selected a node that isn't there"),
    }
}

#[tokio::test]
async fn missing_dump_is_a_data_problem() {
    match run("fetch-resources --path /rest/resources/toaster").await {
        Err(ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            ..
        })) => {}
        Err(err) => panic!("unexpected error: {:?}", err),
        Ok(_) => panic!("found a toaster"),
    }
}

#[tokio::test]
async fn show_rows_needs_a_node() {
    assert!(run("fetch-resources | normalize | show-rows").await.is_err());
    assert!(run("select 0").await.is_err());
}
