use std::collections::BTreeMap;

use serde::Deserialize;

use crate::abstract_gateway::{ErrorDetails, ErrorLayer, Result, ServerError};

pub const DEFAULT_SERVER: &str = "http://localhost:8080/";
pub const DEFAULT_REST_PATH: &str = "/rest/resources/";
pub const DEFAULT_USER: &str = "rest";
pub const DEFAULT_PASSWORD: &str = "rest";
/// How deep the server should expand the tree.
pub const DEFAULT_DEPTH: u32 = 100;

impl From<toml::de::Error> for ServerError {
    fn from(err: toml::de::Error) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::BadInput,
            message: err.to_string(),
        })
    }
}

/// Credentials for the REST interface.  They travel as `user`/`pw` query
/// parameters, which is what the server expects, in the clear.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Credentials {
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

/// Where to find resources and how to ask for them.  A TOML file looks like:
///
/// ```toml
/// server = "http://192.168.0.14:8080/"
/// rest_path = "/rest/resources/"
/// depth = 100
///
/// [credentials]
/// user = "rest"
/// password = "rest"
/// ```
///
/// Every field is optional.  `server` may also be a path to a JSON dump.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: String,
    pub rest_path: String,
    pub depth: u32,
    pub credentials: Credentials,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            server: DEFAULT_SERVER.to_string(),
            rest_path: DEFAULT_REST_PATH.to_string(),
            depth: DEFAULT_DEPTH,
            credentials: Credentials::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_toml_str(s: &str) -> Result<ConsoleConfig> {
        Ok(toml::from_str(s)?)
    }

    /// Query parameters for a tree fetch.
    pub fn fetch_params(&self) -> BTreeMap<String, String> {
        fetch_params(&self.credentials, self.depth)
    }
}

pub fn fetch_params(credentials: &Credentials, depth: u32) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("user".to_string(), credentials.user.clone());
    params.insert("pw".to_string(), credentials.password.clone());
    params.insert("depth".to_string(), depth.to_string());
    params
}

pub fn load(config_path: &str) -> Result<ConsoleConfig> {
    let raw = std::fs::read_to_string(config_path)?;
    ConsoleConfig::from_toml_str(&raw)
}

/// The configuration file (if any) with command line / environment values
/// layered on top.
pub fn resolve(
    config_path: Option<&str>,
    server: Option<String>,
    user: Option<String>,
    password: Option<String>,
) -> Result<ConsoleConfig> {
    let mut config = match config_path {
        Some(path) => load(path)?,
        None => ConsoleConfig::default(),
    };
    if let Some(server) = server {
        config.server = server;
    }
    if let Some(user) = user {
        config.credentials.user = user;
    }
    if let Some(password) = password {
        config.credentials.password = password;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(ConsoleConfig::from_toml_str("").unwrap(), ConsoleConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ConsoleConfig::from_toml_str(
            r#"
            server = "http://10.45.20.127:8080/"

            [credentials]
            password = "hunter2"
            "#,
        )
        .unwrap();
        assert_eq!(config.server, "http://10.45.20.127:8080/");
        assert_eq!(config.rest_path, DEFAULT_REST_PATH);
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.credentials.user, "rest");
        assert_eq!(config.credentials.password, "hunter2");
    }

    #[test]
    fn bad_toml_is_bad_input() {
        match ConsoleConfig::from_toml_str("depth = \"deep\"") {
            Err(ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::BadInput,
                ..
            })) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = resolve(None, Some("dump.json".to_string()), None, Some("pw".to_string()))
            .unwrap();
        assert_eq!(config.server, "dump.json");
        assert_eq!(config.credentials.user, DEFAULT_USER);
        assert_eq!(config.credentials.password, "pw");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(resolve(Some("/nonexistent/resource-admin.toml"), None, None, None).is_err());
    }

    #[test]
    fn params_carry_credentials_and_depth() {
        let params = ConsoleConfig::default().fetch_params();
        assert_eq!(params.get("user").map(String::as_str), Some("rest"));
        assert_eq!(params.get("pw").map(String::as_str), Some("rest"));
        assert_eq!(params.get("depth").map(String::as_str), Some("100"));
    }
}
