use crate::answers::AnswerRecord;
use crate::compose::format::{expand_acronym, format_number, parse_count};
use crate::spec::field::FieldKey;
use crate::visibility::is_visible;

/// Annual return count above which the scale note is emitted.
pub const SCALE_THRESHOLD: i64 = 100_000;

pub const DTC_LED_THRESHOLD: u8 = 70;
pub const RETAIL_LED_THRESHOLD: u8 = 30;

/// Data-driven callout for a section. Each section has at most one; `None` when no rule fires.
pub fn generate_insight(section: u8, record: &AnswerRecord) -> Option<String> {
    match section {
        1 => scale_insight(record),
        2 => retail_program_insight(record),
        3 => channel_mix_insight(record),
        4 => opportunity_insight(record),
        _ => None,
    }
}

fn scale_insight(record: &AnswerRecord) -> Option<String> {
    let volume = parse_count(&record.returns_per_year)?;
    (volume > SCALE_THRESHOLD).then(|| {
        format!(
            "Efficiency at Scale: At {} returns per year, grading throughput and disposition \
             automation account for most of the recoverable margin.",
            format_number(&record.returns_per_year)
        )
    })
}

fn retail_program_insight(record: &AnswerRecord) -> Option<String> {
    if !is_visible(FieldKey::RetailerProgram, record) || record.retailer_program.trim().is_empty() {
        return None;
    }
    Some(format!(
        "Strategic Context: The intersection of annual return volumes and the existing {} \
         retail program establishes the baseline for required facility throughput.",
        expand_acronym(record.retailer_program.trim())
    ))
}

fn channel_mix_insight(record: &AnswerRecord) -> Option<String> {
    let dtc = record.sales_split_dtc;
    if dtc.get() >= DTC_LED_THRESHOLD {
        return Some(format!(
            "Channel Mix: With {}% of sales direct-to-consumer and {}% through retail, most \
             returns arrive through owned channels where grading and resale can be controlled \
             end to end.",
            dtc.get(),
            dtc.complement()
        ));
    }
    if dtc.get() <= RETAIL_LED_THRESHOLD {
        return Some(format!(
            "Channel Mix: With {}% of sales through retail, recovery depends heavily on retailer \
             program terms and the condition of goods returned from stores.",
            dtc.complement()
        ));
    }
    (!record.channel_restrictions.trim().is_empty()).then(|| {
        "Market Consideration: Defined channel restrictions require a multi-tiered framework \
         that protects primary market pricing while maximizing inventory recovery."
            .to_string()
    })
}

fn opportunity_insight(record: &AnswerRecord) -> Option<String> {
    (record.opportunity_feeling == "No").then(|| {
        "Opportunity Gap: Return value is not being fully captured today, which points to \
         recoverable margin in current disposition paths."
            .to_string()
    })
}
