use serde::Serialize;

use crate::answers::AnswerRecord;
use crate::spec::field::FieldKey;
use crate::spec::step::{STEPS, StepId};
use crate::visibility::{VisibilityMap, compute_visibility, is_conditional};

/// Static required fields of `step` plus its conditional fields that are currently visible.
pub fn effective_required(step: StepId, visibility: &VisibilityMap) -> Vec<FieldKey> {
    let spec = step.spec();
    spec.fields
        .iter()
        .copied()
        .filter(|key| {
            if is_conditional(*key) {
                visibility.get(key).copied().unwrap_or(false)
            } else {
                spec.required.contains(key)
            }
        })
        .collect()
}

/// Effective-required fields of `step` that are still blank, in prompt order.
pub fn missing_required(
    step: StepId,
    record: &AnswerRecord,
    visibility: &VisibilityMap,
) -> Vec<FieldKey> {
    if step.is_terminal() {
        return Vec::new();
    }
    effective_required(step, visibility)
        .into_iter()
        .filter(|key| !record.is_filled(*key))
        .collect()
}

/// Whether the wizard may leave `step`. The lead-capture step never blocks.
pub fn can_advance(step: StepId, record: &AnswerRecord, visibility: &VisibilityMap) -> bool {
    missing_required(step, record, visibility).is_empty()
}

/// Whether the document download is enabled: both contact fields are non-blank.
pub fn export_ready(record: &AnswerRecord) -> bool {
    !record.name.trim().is_empty() && !record.email.trim().is_empty()
}

/// Per-step summary used by the CLI `check` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: StepId,
    pub title: &'static str,
    pub can_advance: bool,
    pub missing: Vec<FieldKey>,
}

pub fn step_reports(record: &AnswerRecord) -> Vec<StepReport> {
    let visibility = compute_visibility(record);
    STEPS
        .iter()
        .map(|spec| {
            let missing = missing_required(spec.id, record, &visibility);
            StepReport {
                step: spec.id,
                title: spec.title,
                can_advance: missing.is_empty(),
                missing,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::field::EXCESS_NATIONAL;

    #[test]
    fn conditional_fields_belong_to_their_own_step() {
        let mut record = AnswerRecord::default();
        record.sells_into_retailers = "Yes".into();
        let visibility = compute_visibility(&record);

        let general = effective_required(StepId::General, &visibility);
        let value = effective_required(StepId::Value, &visibility);
        assert!(general.contains(&FieldKey::RetailerProgram));
        assert!(!value.contains(&FieldKey::RetailerProgram));
    }

    #[test]
    fn hidden_conditional_values_are_ignored() {
        let mut record = AnswerRecord::default();
        record.value_priority = "Customer loyalty".into();
        record.opportunity_feeling = "Yes".into();
        record.excess_inventory_channel = EXCESS_NATIONAL.into();
        record.combine_strategy = "No".into();
        let visibility = compute_visibility(&record);
        assert_eq!(
            missing_required(StepId::Value, &record, &visibility),
            vec![FieldKey::ExcessInventoryNational]
        );

        record.excess_inventory_national = "TJX".into();
        let visibility = compute_visibility(&record);
        assert!(can_advance(StepId::Value, &record, &visibility));
    }

    #[test]
    fn blank_strings_do_not_satisfy_required() {
        let mut record = AnswerRecord::default();
        record.branded_dtc = "   ".into();
        record.trade_in = "No".into();
        let visibility = compute_visibility(&record);
        assert_eq!(
            missing_required(StepId::Recommerce, &record, &visibility),
            vec![FieldKey::BrandedDtc]
        );
    }

    #[test]
    fn lead_step_is_always_advanceable() {
        let record = AnswerRecord::default();
        let visibility = compute_visibility(&record);
        assert!(can_advance(StepId::Lead, &record, &visibility));
        assert!(!export_ready(&record));
    }

    #[test]
    fn export_ready_trims_contact_fields() {
        let mut record = AnswerRecord::default();
        record.name = "  ".into();
        record.email = "x@y.com".into();
        assert!(!export_ready(&record));
        record.name = "Jane".into();
        assert!(export_ready(&record));
    }
}
