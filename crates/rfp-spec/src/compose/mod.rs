//! Answer-to-document transformation.
//!
//! [`compose`] is pure: the same record and branding always produce the same [`Document`].
//! Conditional rows are re-derived from the raw answers through the shared visibility rules
//! rather than taken from whatever the intake UI last displayed.

pub mod format;
pub mod insight;
pub mod narrative;

use serde::Serialize;
use serde_json::json;

use crate::answers::{AnswerRecord, AnswerValue};
use crate::branding::Branding;
use crate::spec::field::FieldKey;
use crate::visibility::is_visible;

pub use format::{NOT_AVAILABLE, expand_acronym, format_number, format_value};
pub use insight::generate_insight;
pub use narrative::{Narrative, narrate};

use narrative::{paragraph, render_copy};

/// One question/answer line of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QaRow {
    pub question: String,
    pub answer: String,
    /// Pagination hint: do not split this row across pages.
    pub keep_together: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub number: u8,
    pub title: String,
    pub narrative: Option<String>,
    pub rows: Vec<QaRow>,
    pub insight: Option<String>,
}

impl Section {
    pub fn row(&self, question: &str) -> Option<&QaRow> {
        self.rows.iter().find(|row| row.question == question)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedFor {
    pub company: String,
    pub contact: String,
}

/// Everything an external paginated renderer needs; carries no layout decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub subtitle: String,
    pub consultancy: String,
    pub footer: String,
    pub prepared_for: PreparedFor,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, number: u8) -> Option<&Section> {
        self.sections.iter().find(|section| section.number == number)
    }
}

pub const SECTION_TITLES: [&str; 5] = [
    "Company & Operational Overview",
    "Returns Operations",
    "Recommerce & Channel Strategy",
    "Value & Opportunity",
    "Evaluation Criteria & Next Steps",
];

pub fn compose(record: &AnswerRecord, branding: &Branding) -> Document {
    Document {
        title: branding.document_title.clone(),
        subtitle: branding.document_subtitle.clone(),
        consultancy: branding.consultancy.clone(),
        footer: branding.footer.clone(),
        prepared_for: PreparedFor {
            company: format_value(Some(record.answer(FieldKey::CompanyName))),
            contact: format_value(Some(record.answer(FieldKey::Name))),
        },
        sections: build_sections(record, branding),
    }
}

/// Fixed-order section list for `record`.
pub fn build_sections(record: &AnswerRecord, branding: &Branding) -> Vec<Section> {
    vec![
        section(
            1,
            Some(branding.project_purpose.clone()).filter(|text| !text.trim().is_empty()),
            rows(
                record,
                &[
                    FieldKey::CompanyName,
                    FieldKey::Name,
                    FieldKey::Countries,
                    FieldKey::ReturnsPerYear,
                    FieldKey::Seasonality,
                ],
            ),
            record,
        ),
        section(
            2,
            returns_narrative(record),
            rows(
                record,
                &[
                    FieldKey::SellsIntoRetailers,
                    FieldKey::RetailerProgram,
                    FieldKey::CurrentReturnsHandling,
                    FieldKey::ReturnsHandling,
                    FieldKey::WarrantyProgram,
                    FieldKey::WarrantyInterest,
                    FieldKey::SubscriptionProgram,
                    FieldKey::SubscriptionInterest,
                ],
            ),
            record,
        ),
        section(
            3,
            recommerce_narrative(record),
            rows(
                record,
                &[
                    FieldKey::SalesSplitDtc,
                    FieldKey::InterestedChannels,
                    FieldKey::ChannelRestrictions,
                    FieldKey::BrandedDtc,
                    FieldKey::BrandedManagement,
                    FieldKey::TradeIn,
                ],
            ),
            record,
        ),
        section(4, value_narrative(record), value_rows(record), record),
        closing_section(branding),
    ]
}

fn section(
    number: u8,
    narrative: Option<String>,
    rows: Vec<QaRow>,
    record: &AnswerRecord,
) -> Section {
    Section {
        number,
        title: SECTION_TITLES[usize::from(number) - 1].to_string(),
        narrative,
        rows,
        insight: generate_insight(number, record),
    }
}

/// Rows for `keys`, skipping conditional fields whose gate does not match.
fn rows(record: &AnswerRecord, keys: &[FieldKey]) -> Vec<QaRow> {
    keys.iter()
        .copied()
        .filter(|key| is_visible(*key, record))
        .map(|key| answer_row(record, key))
        .collect()
}

fn answer_row(record: &AnswerRecord, key: FieldKey) -> QaRow {
    let spec = key.spec();
    let value = record.answer(key);
    let mut answer = match (key, value) {
        (FieldKey::ReturnsPerYear, AnswerValue::Text(text)) => {
            format_value(Some(AnswerValue::Text(&format_number(text))))
        }
        _ => format_value(Some(value)),
    };
    if let Some(suffix) = spec.display_suffix
        && !value.is_empty()
    {
        answer.push_str(suffix);
    }
    if spec.expand_acronyms {
        answer = expand_acronym(&answer);
    }
    QaRow {
        question: spec.label.to_string(),
        answer,
        keep_together: spec.keep_together(),
    }
}

fn value_rows(record: &AnswerRecord) -> Vec<QaRow> {
    let mut out = rows(
        record,
        &[
            FieldKey::ValuePriority,
            FieldKey::OpportunityFeeling,
            FieldKey::ExcessInventoryChannel,
            FieldKey::ExcessInventoryNational,
            FieldKey::ExcessInventoryRegional,
        ],
    );
    // The free-text field only predates the channel choice; show it when nothing newer exists.
    if record.excess_inventory_channel.trim().is_empty()
        && !record.excess_inventory.trim().is_empty()
    {
        out.push(answer_row(record, FieldKey::ExcessInventory));
    }
    out.push(answer_row(record, FieldKey::CombineStrategy));
    out
}

fn gated(record: &AnswerRecord, key: FieldKey, narrative: Narrative) -> Option<String> {
    if !is_visible(key, record) {
        return None;
    }
    narrate(narrative, record.text(key).unwrap_or_default())
}

fn returns_narrative(record: &AnswerRecord) -> Option<String> {
    paragraph([
        narrate(Narrative::RetailPresence, &record.sells_into_retailers),
        narrate(Narrative::WarrantyProgram, &record.warranty_program),
        gated(record, FieldKey::WarrantyInterest, Narrative::WarrantyInterest),
        narrate(Narrative::SubscriptionProgram, &record.subscription_program),
        gated(
            record,
            FieldKey::SubscriptionInterest,
            Narrative::SubscriptionInterest,
        ),
    ])
}

fn recommerce_narrative(record: &AnswerRecord) -> Option<String> {
    paragraph([
        narrate(Narrative::BrandedDtc, &record.branded_dtc),
        gated(
            record,
            FieldKey::BrandedManagement,
            Narrative::ManagementPreference,
        ),
        narrate(Narrative::TradeIn, &record.trade_in),
    ])
}

fn value_narrative(record: &AnswerRecord) -> Option<String> {
    paragraph([
        narrate(Narrative::ValuePriority, &record.value_priority),
        narrate(Narrative::OpportunityFeeling, &record.opportunity_feeling),
        narrate(Narrative::CombineStrategy, &record.combine_strategy),
    ])
}

fn closing_section(branding: &Branding) -> Section {
    let narrative = render_copy(
        &branding.next_steps,
        &json!({ "consultancy": branding.consultancy, "expert": branding.expert_name }),
    );
    Section {
        number: 5,
        title: SECTION_TITLES[4].to_string(),
        narrative,
        rows: branding
            .evaluation_criteria
            .iter()
            .map(|criterion| QaRow {
                question: criterion.name.clone(),
                answer: format_value(Some(AnswerValue::Text(&criterion.weight))),
                keep_together: false,
            })
            .collect(),
        insight: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_come_out_in_fixed_order() {
        let document = compose(&AnswerRecord::default(), &Branding::default());
        let numbers: Vec<u8> = document.sections.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(document.sections[2].title, "Recommerce & Channel Strategy");
        assert_eq!(document.prepared_for.company, "N/A");
    }

    #[test]
    fn empty_record_renders_na_rows_without_narrative() {
        let document = compose(&AnswerRecord::default(), &Branding::default());
        let returns = document.section(2).unwrap();
        assert_eq!(returns.narrative, None);
        assert_eq!(returns.row("Sells into retailers").unwrap().answer, "N/A");
        assert!(returns.row("Retailer program").is_none());
        assert!(document.section(1).unwrap().narrative.is_some());
        assert_eq!(
            document.section(1).unwrap().row("Seasonality").unwrap().answer,
            "Mostly flat"
        );
    }

    #[test]
    fn legacy_excess_inventory_only_without_channel() {
        let mut record = AnswerRecord::default();
        record.excess_inventory = "Liquidators".into();
        let sections = build_sections(&record, &Branding::default());
        assert_eq!(sections[3].row("Excess inventory").unwrap().answer, "Liquidators");

        record.excess_inventory_channel = "Off-Priced Retailers (National)".into();
        let sections = build_sections(&record, &Branding::default());
        assert!(sections[3].row("Excess inventory").is_none());
        assert_eq!(sections[3].row("National retailers").unwrap().answer, "N/A");
    }

    #[test]
    fn closing_section_uses_branding_copy() {
        let branding = Branding {
            consultancy: "Acme".into(),
            expert_name: "Sam".into(),
            ..Branding::default()
        };
        let closing = closing_section(&branding);
        assert!(closing.narrative.as_deref().unwrap().starts_with("A Acme expert (Sam)"));
        assert_eq!(closing.row("Strategic Alignment").unwrap().answer, "30%");
    }

    #[test]
    fn free_text_rows_are_kept_together() {
        let document = compose(&AnswerRecord::default(), &Branding::default());
        let returns = document.section(2).unwrap();
        assert!(returns.row("Returns handling").unwrap().keep_together);
        assert!(!returns.row("Warranty program").unwrap().keep_together);
        let overview = document.section(1).unwrap();
        assert!(overview.row("Countries").unwrap().keep_together);
        assert!(!overview.row("Seasonality").unwrap().keep_together);
    }
}
