use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unknown answer field '{0}'")]
    UnknownField(String),

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("json encode error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
