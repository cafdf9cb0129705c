use serde_json::{Map, Value, json};

use crate::answers::AnswerRecord;
use crate::compose::{Document, format_value};
use crate::session::{SessionProgress, WizardSession};
use crate::spec::field::{FieldKey, FieldKind};
use crate::spec::step::StepId;
use crate::validate::effective_required;
use crate::visibility::is_visible;

/// Describes a single field of the current step for renderers.
#[derive(Debug, Clone)]
pub struct RenderQuestion {
    pub key: FieldKey,
    pub prompt: &'static str,
    pub helper: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    pub visible: bool,
    pub current_value: String,
}

/// Collected payload for the step the session currently sits on.
#[derive(Debug, Clone)]
pub struct StepPayload {
    pub step: StepId,
    pub title: &'static str,
    pub blurb: &'static str,
    pub progress: SessionProgress,
    pub can_advance: bool,
    pub export_ready: bool,
    pub questions: Vec<RenderQuestion>,
}

impl StepPayload {
    pub fn visible_questions(&self) -> impl Iterator<Item = &RenderQuestion> {
        self.questions.iter().filter(|question| question.visible)
    }
}

pub fn build_step_payload(session: &WizardSession) -> StepPayload {
    let record = session.record();
    let spec = session.current_spec();
    let required = effective_required(spec.id, &session.visibility());

    let questions = spec
        .fields
        .iter()
        .map(|key| {
            let field = key.spec();
            RenderQuestion {
                key: *key,
                prompt: field.prompt,
                helper: field.helper,
                kind: field.kind,
                required: required.contains(key),
                visible: is_visible(*key, record),
                current_value: current_value(record, *key),
            }
        })
        .collect();

    StepPayload {
        step: spec.id,
        title: spec.title,
        blurb: spec.blurb,
        progress: session.progress(),
        can_advance: session.can_advance(),
        export_ready: session.export_ready(),
        questions,
    }
}

fn current_value(record: &AnswerRecord, key: FieldKey) -> String {
    let value = record.answer(key);
    if value.is_empty() {
        String::new()
    } else {
        format_value(Some(value))
    }
}

/// Render the step payload as human-friendly text.
pub fn render_step_text(payload: &StepPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Step {} of {}: {}",
        payload.progress.position, payload.progress.total, payload.title
    ));
    lines.push(payload.blurb.to_string());
    for question in payload.visible_questions() {
        let mut entry = format!(" - {}", question.prompt);
        if question.required {
            entry.push_str(" [required]");
        }
        if !question.current_value.is_empty() {
            entry.push_str(&format!(" = {}", question.current_value));
        }
        lines.push(entry);
    }
    if payload.step.is_terminal() {
        lines.push(format!(
            "Export: {}",
            if payload.export_ready { "ready" } else { "name and email required" }
        ));
    } else if !payload.can_advance {
        lines.push("Answer the required questions to continue.".to_string());
    }
    lines.join("\n")
}

/// Render the step payload as a structured JSON-friendly value.
pub fn render_step_json(payload: &StepPayload) -> Value {
    let questions = payload
        .questions
        .iter()
        .map(|question| {
            let mut map = Map::new();
            map.insert("id".into(), Value::String(question.key.as_str().into()));
            map.insert("title".into(), Value::String(question.prompt.into()));
            if let Some(helper) = question.helper {
                map.insert("helper".into(), Value::String(helper.into()));
            }
            map.insert("type".into(), Value::String(question.kind.label().into()));
            let choices = question.kind.choices();
            if !choices.is_empty() {
                map.insert(
                    "choices".into(),
                    Value::Array(choices.iter().map(|c| Value::String((*c).into())).collect()),
                );
            }
            map.insert("required".into(), Value::Bool(question.required));
            map.insert("visible".into(), Value::Bool(question.visible));
            map.insert(
                "current_value".into(),
                Value::String(question.current_value.clone()),
            );
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "step": payload.step.as_str(),
        "title": payload.title,
        "blurb": payload.blurb,
        "progress": {
            "position": payload.progress.position,
            "total": payload.progress.total,
            "percent": payload.progress.percent,
        },
        "can_advance": payload.can_advance,
        "export_ready": payload.export_ready,
        "questions": questions,
    })
}

/// Render the composed document as plain text.
pub fn render_text(document: &Document) -> String {
    let mut lines = Vec::new();
    lines.push(document.title.clone());
    lines.push(document.subtitle.clone());
    lines.push(format!("Prepared by: {}", document.consultancy));
    lines.push(format!("Company: {}", document.prepared_for.company));
    lines.push(format!("Contact: {}", document.prepared_for.contact));

    for section in &document.sections {
        lines.push(String::new());
        lines.push(format!("{}.0 {}", section.number, section.title));
        if let Some(narrative) = &section.narrative {
            lines.push(narrative.clone());
        }
        for row in &section.rows {
            lines.push(format!("  {}: {}", row.question, row.answer));
        }
        if let Some(insight) = &section.insight {
            lines.push(format!("  > {}", insight));
        }
    }

    lines.push(String::new());
    lines.push(document.footer.clone());
    lines.join("\n")
}

/// Render the composed document as JSON.
pub fn render_json(document: &Document) -> Value {
    let sections = document
        .sections
        .iter()
        .map(|section| {
            json!({
                "number": section.number,
                "title": section.title,
                "narrative": section.narrative,
                "rows": section
                    .rows
                    .iter()
                    .map(|row| json!({
                        "question": row.question,
                        "answer": row.answer,
                        "keep_together": row.keep_together,
                    }))
                    .collect::<Vec<_>>(),
                "insight": section.insight,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "title": document.title,
        "subtitle": document.subtitle,
        "consultancy": document.consultancy,
        "footer": document.footer,
        "prepared_for": {
            "company": document.prepared_for.company,
            "contact": document.prepared_for.contact,
        },
        "sections": sections,
    })
}
