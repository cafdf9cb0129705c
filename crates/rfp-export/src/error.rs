use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("export blocked: {0}")]
    NotReady(&'static str),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
