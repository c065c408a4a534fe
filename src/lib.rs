extern crate serde;
extern crate serde_json;

#[macro_use]
extern crate lazy_static;

pub mod abstract_gateway;
pub mod cmd_pipeline;
pub mod config;
pub mod console;
pub mod logging;
pub mod resource_tree;
