#![allow(missing_docs)]

pub mod answers;
pub mod branding;
pub mod compose;
pub mod error;
pub mod filename;
pub mod render;
pub mod session;
pub mod spec;
pub mod validate;
pub mod visibility;

pub use answers::{AnswerRecord, AnswerValue, FieldValue, Percent};
pub use branding::{Branding, Criterion, Theme};
pub use compose::{
    Document, PreparedFor, QaRow, Section, build_sections, compose, expand_acronym, format_number,
    format_value, generate_insight, narrate,
};
pub use error::RecordError;
pub use filename::suggested_filename;
pub use render::{
    RenderQuestion, StepPayload, build_step_payload, render_json, render_step_json,
    render_step_text, render_text,
};
pub use session::{ExportState, SessionProgress, WizardSession};
pub use spec::{
    FieldKey, FieldKind, FieldSpec, STEP_COUNT, STEPS, StepId, StepSpec, group_thousands,
};
pub use validate::{StepReport, can_advance, export_ready, missing_required, step_reports};
pub use visibility::{RULES, VisibilityMap, VisibilityRule, compute_visibility, is_visible};
