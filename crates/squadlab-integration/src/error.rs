use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported catalog layout: expected a JSON array or an object of documents")]
    Layout,

    #[error("Catalog contains no {kind}")]
    Empty { kind: &'static str },
}
