pub mod docx;
pub mod error;
pub mod styles;

use std::fmt;
use std::str::FromStr;

use rfp_spec::{
    Branding, Document, WizardSession, compose, render_json, render_text, suggested_filename,
};
use tracing::debug;

pub use crate::docx::{DocxRenderer, generate_docx};
pub use crate::error::ExportError;
pub use crate::styles::DocumentStyles;

/// Turns a composed document into the bytes of a downloadable file.
pub trait DocumentRenderer {
    fn render(&self, document: &Document, branding: &Branding) -> Result<Vec<u8>, ExportError>;

    /// File extension without the leading dot.
    fn extension(&self) -> &'static str;
}

#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl DocumentRenderer for TextRenderer {
    fn render(&self, document: &Document, _branding: &Branding) -> Result<Vec<u8>, ExportError> {
        let mut text = render_text(document);
        text.push('\n');
        Ok(text.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn render(&self, document: &Document, _branding: &Branding) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(&render_json(document))?)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Docx,
    Text,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn DocumentRenderer> {
        match self {
            OutputFormat::Docx => Box::new(DocxRenderer),
            OutputFormat::Text => Box::new(TextRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unsupported format '{other}' (expected docx, text or json)")),
        }
    }
}

/// A rendered document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Runs one export through the session's gate: snapshot the answers, compose, render and
/// record the outcome so the session can report it or allow a retry.
pub fn export_session(
    session: &mut WizardSession,
    branding: &Branding,
    renderer: &dyn DocumentRenderer,
) -> Result<ExportedDocument, ExportError> {
    let Some(record) = session.begin_export() else {
        return Err(ExportError::NotReady(
            "name and email are required, or a document is already being prepared",
        ));
    };

    let document = compose(&record, branding);
    let filename = suggested_filename(&record, branding, renderer.extension());
    debug!(%filename, sections = document.sections.len(), "rendering document");

    match renderer.render(&document, branding) {
        Ok(bytes) => {
            session.finish_export::<ExportError>(Ok(filename.clone()));
            Ok(ExportedDocument { filename, bytes })
        }
        Err(err) => {
            session.finish_export::<&ExportError>(Err(&err));
            Err(err)
        }
    }
}
