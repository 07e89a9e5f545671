use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File error `{path}`: {error}")]
    File { path: PathBuf, error: io::Error },
    #[error("Could not read the call log from stdin: {0}")]
    Stdin(io::Error),
    #[error("Could not serialize the report: {0}")]
    Serialize(serde_json::Error),
    #[error("{0}")]
    Internal(phone_bill::Error),
}

impl Error {
    pub fn file(path: PathBuf, error: io::Error) -> Self {
        Self::File { path, error }
    }
}
