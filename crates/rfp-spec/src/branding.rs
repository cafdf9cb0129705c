use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Colour theme handed to renderers; hex strings without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Theme {
    pub primary: String,
    pub body_text: String,
    pub muted: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "0A0E27".to_string(),
            body_text: "000000".to_string(),
            muted: "666666".to_string(),
        }
    }
}

/// One weighted line of the evaluation framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Criterion {
    pub name: String,
    pub weight: String,
}

impl Criterion {
    fn new(name: &str, weight: &str) -> Self {
        Self {
            name: name.to_string(),
            weight: weight.to_string(),
        }
    }
}

/// Copy and styling that vary between deployments of the same wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Branding {
    pub consultancy: String,
    pub document_title: String,
    pub document_subtitle: String,
    pub footer: String,
    pub expert_name: String,
    pub project_purpose: String,
    /// Handlebars template; `consultancy` and `expert` are in scope.
    pub next_steps: String,
    pub evaluation_criteria: Vec<Criterion>,
    pub theme: Theme,
    pub filename_suffix: String,
    pub fallback_filename: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            consultancy: "Nok Recommerce".to_string(),
            document_title: "Request for Proposal".to_string(),
            document_subtitle: "Comprehensive Reverse Logistics Partner".to_string(),
            footer: "Confidential".to_string(),
            expert_name: "Maddy".to_string(),
            project_purpose: "This document was developed to establish a structured understanding of \
                current operations, strategic priorities, and areas of opportunity. The information \
                captured reflects a combination of operational inputs intended to surface efficiencies \
                and highlight potential paths for improvement. The purpose of this assessment is to \
                enable a collaborative discussion around priorities, constraints, and success metrics \
                to ensure recommended initiatives are practical and positioned for long-term success."
                .to_string(),
            next_steps: "A {{consultancy}} expert ({{expert}}) will reach out shortly to facilitate a \
                review of these findings, validate the assumptions captured here, and explore alignment \
                with broader business objectives. This process is intended to support scalable, \
                data-informed decisions."
                .to_string(),
            evaluation_criteria: vec![
                Criterion::new("Strategic Alignment", "30%"),
                Criterion::new("Capability & Experience", "30%"),
                Criterion::new("Technology & Innovation", "20%"),
                Criterion::new("Pricing & Value", "20%"),
            ],
            theme: Theme::default(),
            filename_suffix: "RFP".to_string(),
            fallback_filename: "RFP".to_string(),
        }
    }
}

impl Branding {
    pub fn from_json_str(raw: &str) -> Result<Self, RecordError> {
        serde_json::from_str(raw).map_err(|source| RecordError::Parse {
            what: "branding",
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let raw = fs::read_to_string(path).map_err(|source| RecordError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn schema() -> Result<serde_json::Value, RecordError> {
        serde_json::to_value(schemars::schema_for!(Branding)).map_err(RecordError::Encode)
    }
}
