use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{from_str, Value};
use tracing::trace;
use url::{ParseError, Url};

use super::gateway_interface::{ErrorDetails, ErrorLayer, ResourceGateway, Result, ServerError};

/// reqwest won't return an error for an unhappy status code itself; someone
/// would need to call `Response::error_from_status`, so for now we'll generally
/// assume everything is some kind of transient problem.
impl From<reqwest::Error> for ServerError {
    fn from(err: reqwest::Error) -> ServerError {
        ServerError::TransientProblem(ErrorDetails {
            layer: ErrorLayer::ServerLayer,
            message: err.to_string(),
        })
    }
}

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: err.to_string(),
        })
    }
}

#[derive(Debug)]
struct RemoteGateway {
    server_base_url: Url,
    client: reqwest::Client,
}

impl RemoteGateway {
    /// Resource paths are usually absolute (`/rest/resources/`) which `join`
    /// treats as replacing the base path entirely, which is what we want.
    fn build_url(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Url> {
        let mut url = self.server_base_url.join(path)?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<reqwest::Response> {
        let res = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !res.status().is_success() {
            if res.status().is_server_error() {
                return Err(ServerError::TransientProblem(ErrorDetails {
                    layer: ErrorLayer::ServerLayer,
                    message: format!("Server status of {}", res.status()),
                }));
            } else {
                return Err(ServerError::StickyProblem(ErrorDetails {
                    layer: ErrorLayer::DataLayer,
                    message: format!("Server status of {}", res.status()),
                }));
            }
        }

        Ok(res)
    }
}

#[async_trait]
impl ResourceGateway for RemoteGateway {
    fn describe(&self) -> String {
        self.server_base_url.to_string()
    }

    async fn fetch_json(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Value> {
        let url = self.build_url(path, params)?;
        // The query string carries the password, so only log the path.
        trace!(path = url.path(), "fetching resources");
        let raw_str = self.get_json(url).await?.text().await?;
        match from_str(&raw_str) {
            Ok(json) => Ok(json),
            Err(err) => Err(ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::ServerLayer,
                message: err.to_string(),
            })),
        }
    }
}

pub fn make_remote_gateway(server_base_url: Url) -> Result<Box<dyn ResourceGateway + Send + Sync>> {
    if server_base_url.cannot_be_a_base() {
        return Err(ServerError::bad_input(format!(
            "not usable as a base URL: {}",
            server_base_url
        )));
    }

    Ok(Box::new(RemoteGateway {
        server_base_url,
        client: reqwest::Client::new(),
    }))
}
