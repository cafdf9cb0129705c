use serde::Serialize;
use tracing::{debug, info, warn};

use crate::answers::{AnswerRecord, FieldValue};
use crate::spec::field::FieldKey;
use crate::spec::step::{STEP_COUNT, StepId, StepSpec};
use crate::validate;
use crate::visibility::{VisibilityMap, compute_visibility};

/// Lifecycle of the document download action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExportState {
    Idle,
    /// A document is being generated; further triggers are refused.
    Preparing,
    Ready { filename: String },
    /// The renderer failed; the action may be triggered again.
    Failed { message: String },
}

/// Progress counters for the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionProgress {
    /// 1-based position of the current step.
    pub position: usize,
    pub total: usize,
    pub percent: f64,
}

/// In-memory wizard state: the answer record, the current step and the export gate.
#[derive(Debug, Clone)]
pub struct WizardSession {
    record: AnswerRecord,
    step_index: usize,
    export: ExportState,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self::with_record(AnswerRecord::default())
    }

    /// Starts at the first step with a pre-filled record.
    pub fn with_record(record: AnswerRecord) -> Self {
        Self {
            record,
            step_index: 0,
            export: ExportState::Idle,
        }
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn current_step(&self) -> StepId {
        StepId::from_index(self.step_index).unwrap_or(StepId::General)
    }

    pub fn current_spec(&self) -> &'static StepSpec {
        self.current_step().spec()
    }

    pub fn progress(&self) -> SessionProgress {
        let position = self.step_index + 1;
        SessionProgress {
            position,
            total: STEP_COUNT,
            percent: position as f64 / STEP_COUNT as f64 * 100.0,
        }
    }

    /// Writes one answer as given. Never fails: a value of the wrong kind is dropped.
    pub fn update_field(&mut self, key: FieldKey, value: impl Into<FieldValue>) {
        if !self.record.set(key, value.into()) {
            debug!(field = %key, "ignored answer with mismatched kind");
        }
    }

    pub fn toggle_channel(&mut self, option: &str) {
        self.record.toggle_channel(option);
    }

    /// Recomputed on every call; nothing is cached between field changes.
    pub fn visibility(&self) -> VisibilityMap {
        compute_visibility(&self.record)
    }

    pub fn can_advance(&self) -> bool {
        validate::can_advance(self.current_step(), &self.record, &self.visibility())
    }

    pub fn missing_required(&self) -> Vec<FieldKey> {
        validate::missing_required(self.current_step(), &self.record, &self.visibility())
    }

    pub fn export_ready(&self) -> bool {
        validate::export_ready(&self.record)
    }

    /// Moves forward one step; no-op on the last step.
    pub fn go_next(&mut self) {
        if self.step_index + 1 < STEP_COUNT {
            self.step_index += 1;
        }
    }

    /// Moves back one step; no-op on the first step.
    pub fn go_back(&mut self) {
        self.step_index = self.step_index.saturating_sub(1);
    }

    /// Free navigation to any step regardless of completion. Out-of-range indexes are ignored.
    pub fn go_to_step(&mut self, index: usize) {
        if index < STEP_COUNT {
            self.step_index = index;
        } else {
            debug!(index, "ignored jump to out-of-range step");
        }
    }

    pub fn reset(&mut self) {
        self.record = AnswerRecord::default();
        self.step_index = 0;
        self.export = ExportState::Idle;
    }

    pub fn export_state(&self) -> &ExportState {
        &self.export
    }

    /// Starts a document generation and returns an owned snapshot of the answers.
    ///
    /// Returns `None` while a generation is already in flight or when the contact fields
    /// are incomplete.
    pub fn begin_export(&mut self) -> Option<AnswerRecord> {
        if self.export == ExportState::Preparing || !self.export_ready() {
            return None;
        }
        info!("document generation started");
        self.export = ExportState::Preparing;
        Some(self.record.clone())
    }

    /// Records the outcome of the generation started by [`begin_export`](Self::begin_export).
    pub fn finish_export<E: std::fmt::Display>(&mut self, outcome: Result<String, E>) {
        if self.export != ExportState::Preparing {
            debug!("export outcome received with no generation in flight");
            return;
        }
        self.export = match outcome {
            Ok(filename) => {
                info!(%filename, "document generation finished");
                ExportState::Ready { filename }
            }
            Err(err) => {
                warn!(error = %err, "document generation failed");
                ExportState::Failed {
                    message: err.to_string(),
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_is_clamped_at_both_ends() {
        let mut session = WizardSession::new();
        session.go_back();
        assert_eq!(session.step_index(), 0);
        for _ in 0..10 {
            session.go_next();
        }
        assert_eq!(session.current_step(), StepId::Lead);
        session.go_to_step(42);
        assert_eq!(session.current_step(), StepId::Lead);
        session.go_to_step(1);
        assert_eq!(session.current_step(), StepId::Recommerce);
    }

    #[test]
    fn return_volume_is_stored_as_typed() {
        let mut session = WizardSession::new();
        session.update_field(FieldKey::ReturnsPerYear, "roughly 20k");
        assert_eq!(session.record().returns_per_year, "roughly 20k");
        session.update_field(FieldKey::ReturnsPerYear, "lots");
        assert_eq!(session.record().returns_per_year, "lots");
        session.update_field(FieldKey::ReturnsPerYear, "150000");
        assert_eq!(session.record().returns_per_year, "150000");
    }

    #[test]
    fn export_gate_refuses_double_trigger() {
        let mut session = WizardSession::new();
        assert!(session.begin_export().is_none());

        session.update_field(FieldKey::Name, "Jane Doe");
        session.update_field(FieldKey::Email, "jane@example.com");
        let snapshot = session.begin_export().expect("snapshot");
        assert!(session.begin_export().is_none());

        session.update_field(FieldKey::Name, "Someone Else");
        assert_eq!(snapshot.name, "Jane Doe");

        session.finish_export::<String>(Err("renderer offline".into()));
        assert!(matches!(session.export_state(), ExportState::Failed { .. }));
        assert!(session.begin_export().is_some());
        session.finish_export::<String>(Ok("Someone-Else-RFP.docx".into()));
        assert_eq!(
            session.export_state(),
            &ExportState::Ready {
                filename: "Someone-Else-RFP.docx".into()
            }
        );
    }

    #[test]
    fn progress_reports_position() {
        let mut session = WizardSession::new();
        session.go_to_step(1);
        let progress = session.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
    }
}
