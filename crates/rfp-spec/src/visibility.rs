use crate::answers::AnswerRecord;
use crate::spec::field::{EXCESS_NATIONAL, EXCESS_REGIONAL, FieldKey};

pub type VisibilityMap = std::collections::BTreeMap<FieldKey, bool>;

/// A dependent field is shown only while its gating field holds exactly `trigger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityRule {
    pub field: FieldKey,
    pub gate: FieldKey,
    pub trigger: &'static str,
}

impl VisibilityRule {
    pub fn matches(&self, record: &AnswerRecord) -> bool {
        record.text(self.gate) == Some(self.trigger)
    }
}

/// The only source of conditional visibility. Intake and document composition both read it.
pub const RULES: &[VisibilityRule] = &[
    VisibilityRule {
        field: FieldKey::RetailerProgram,
        gate: FieldKey::SellsIntoRetailers,
        trigger: "Yes",
    },
    VisibilityRule {
        field: FieldKey::WarrantyInterest,
        gate: FieldKey::WarrantyProgram,
        trigger: "No",
    },
    VisibilityRule {
        field: FieldKey::SubscriptionInterest,
        gate: FieldKey::SubscriptionProgram,
        trigger: "No",
    },
    VisibilityRule {
        field: FieldKey::BrandedManagement,
        gate: FieldKey::BrandedDtc,
        trigger: "Yes",
    },
    VisibilityRule {
        field: FieldKey::ExcessInventoryNational,
        gate: FieldKey::ExcessInventoryChannel,
        trigger: EXCESS_NATIONAL,
    },
    VisibilityRule {
        field: FieldKey::ExcessInventoryRegional,
        gate: FieldKey::ExcessInventoryChannel,
        trigger: EXCESS_REGIONAL,
    },
];

pub fn rule_for(field: FieldKey) -> Option<&'static VisibilityRule> {
    RULES.iter().find(|rule| rule.field == field)
}

pub fn is_conditional(field: FieldKey) -> bool {
    rule_for(field).is_some()
}

/// Whether `field` is currently shown. Unconditional fields are always visible.
pub fn is_visible(field: FieldKey, record: &AnswerRecord) -> bool {
    rule_for(field).is_none_or(|rule| rule.matches(record))
}

/// Evaluates every rule against `record`; one entry per conditional field.
pub fn compute_visibility(record: &AnswerRecord) -> VisibilityMap {
    RULES
        .iter()
        .map(|rule| (rule.field, rule.matches(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_on_exact_enum_value() {
        let mut record = AnswerRecord::default();
        assert!(!is_visible(FieldKey::RetailerProgram, &record));

        record.sells_into_retailers = "Yes".into();
        assert!(is_visible(FieldKey::RetailerProgram, &record));

        record.sells_into_retailers = "yes".into();
        assert!(!is_visible(FieldKey::RetailerProgram, &record));
    }

    #[test]
    fn excess_inventory_sub_channels_are_exclusive() {
        let mut record = AnswerRecord::default();
        record.excess_inventory_channel = EXCESS_REGIONAL.into();
        let map = compute_visibility(&record);
        assert_eq!(map.get(&FieldKey::ExcessInventoryRegional), Some(&true));
        assert_eq!(map.get(&FieldKey::ExcessInventoryNational), Some(&false));
    }

    #[test]
    fn map_only_covers_conditional_fields() {
        let map = compute_visibility(&AnswerRecord::default());
        assert_eq!(map.len(), RULES.len());
        assert!(map.values().all(|visible| !visible));
        assert!(is_visible(FieldKey::Countries, &AnswerRecord::default()));
    }
}
