use std::path::PathBuf;

use thiserror::Error;

/// Anything that aborts the rewrite of a file.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Destructure(#[from] DestructureError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The classifier accepted a pattern the builder cannot express.
    #[error("Unrecognized rest spread argument in JSON module \"{module}\"")]
    UnsupportedShape { module: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unable to read JSON module \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse JSON module \"{}\": {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DestructureError {
    #[error("Attempting to destructure from non-object JSON module \"{module}\"")]
    NonObject { module: String },

    #[error(
        "Attempting to positionally destructure from non-array/string JSON module \"{module}\""
    )]
    NonArrayOrString { module: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid plugin config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid `match` pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid `matchFlags` flag {flag:?}")]
    Flag { flag: char },
}
