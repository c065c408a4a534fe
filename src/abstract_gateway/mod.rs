mod gateway_interface;
mod local_gateway;
mod remote_gateway;

use url::Url;

pub use gateway_interface::{ErrorDetails, ErrorLayer, ResourceGateway, Result, ServerError};
pub use local_gateway::make_local_gateway;
pub use remote_gateway::make_remote_gateway;

/// Pick the remote gateway if `server` parses as a URL, otherwise treat it as
/// a path to a dump on disk.  Returns the kind alongside for logging.
pub fn make_gateway(server: &str) -> Result<(&'static str, Box<dyn ResourceGateway + Send + Sync>)> {
    match Url::parse(server) {
        Ok(url) => Ok(("remote", make_remote_gateway(url)?)),
        Err(_) => Ok(("local", make_local_gateway(server)?)),
    }
}
