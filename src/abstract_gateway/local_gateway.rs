use std::{
    collections::BTreeMap,
    io::Read,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use flate2::read::GzDecoder;
use serde_json::{from_str, Value};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::trace;

use super::gateway_interface::{ErrorDetails, ErrorLayer, ResourceGateway, Result, ServerError};

/// IO errors amount to a 404 for our purposes which means a sticky problem.
impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> ServerError {
        ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: err.to_string(),
        })
    }
}

/// Read a JSON document that may have been gzip-compressed.
async fn read_json_from_file(path: &Path) -> Result<Value> {
    let mut f = File::open(path).await?;
    let mut buffer = Vec::new();
    f.read_to_end(&mut buffer).await?;

    let raw_str = if path.extension().map_or(false, |ext| ext == "gz") {
        let mut gz = GzDecoder::new(&buffer[..]);
        let mut raw_str = String::new();
        gz.read_to_string(&mut raw_str)?;
        raw_str
    } else {
        String::from_utf8(buffer).map_err(|err| {
            ServerError::StickyProblem(ErrorDetails {
                layer: ErrorLayer::DataLayer,
                message: err.to_string(),
            })
        })?
    };

    Ok(from_str(&raw_str)?)
}

/// Serves dumps of the REST interface from disk.
///
/// If `root` is a file, that one document is the answer to every path.  If it
/// is a directory, the resource path is mapped onto it, so `/rest/resources/`
/// is looked up as `ROOT/rest/resources.json` (or `.json.gz`).
#[derive(Debug)]
struct LocalGateway {
    root: PathBuf,
}

impl LocalGateway {
    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let rel = path.trim_matches('/');
        if rel.is_empty() {
            return vec![self.root.join("index.json"), self.root.join("index.json.gz")];
        }
        vec![
            self.root.join(format!("{}.json", rel)),
            self.root.join(format!("{}.json.gz", rel)),
        ]
    }
}

#[async_trait]
impl ResourceGateway for LocalGateway {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch_json(&self, path: &str, params: &BTreeMap<String, String>) -> Result<Value> {
        // There's no server here to bound the depth or check credentials.
        trace!(path, ignored_params = params.len(), "reading local resources");

        let candidates = self.candidates(path);
        for candidate in &candidates {
            if candidate.is_file() {
                return read_json_from_file(candidate).await;
            }
        }

        Err(ServerError::StickyProblem(ErrorDetails {
            layer: ErrorLayer::DataLayer,
            message: format!("no resource dump for {} under {}", path, self.root.display()),
        }))
    }
}

pub fn make_local_gateway(root: &str) -> Result<Box<dyn ResourceGateway + Send + Sync>> {
    let root = PathBuf::from(root);
    if !root.exists() {
        return Err(ServerError::bad_input(format!(
            "no such resource dump: {}",
            root.display()
        )));
    }

    Ok(Box::new(LocalGateway { root }))
}
