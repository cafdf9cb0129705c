use std::sync::LazyLock;

use regex::Regex;

use crate::answers::AnswerValue;
use crate::spec::field::{PROGRAM_DEFINITIONS, group_digits};

pub const NOT_AVAILABLE: &str = "N/A";

/// Single normalisation point for every displayed answer. Never returns an empty string.
pub fn format_value(value: Option<AnswerValue<'_>>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(value) if value.is_empty() => NOT_AVAILABLE.to_string(),
        Some(AnswerValue::Text(text)) => text.to_string(),
        Some(AnswerValue::List(items)) => items.join(", "),
        Some(AnswerValue::Number(number)) => number.to_string(),
    }
}

struct Acronym {
    pattern: Regex,
    expansion: &'static str,
    replacement: String,
}

static ACRONYMS: LazyLock<Vec<Acronym>> = LazyLock::new(|| {
    PROGRAM_DEFINITIONS
        .iter()
        .filter_map(|&(code, expansion, _)| {
            let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(code))).ok()?;
            Some(Acronym {
                pattern,
                expansion,
                replacement: format!("{expansion} ({code})"),
            })
        })
        .collect()
});

/// Replaces bare DIF/ZVR/RTV tokens with "<Expansion> (<CODE>)".
///
/// A code is left alone when its expansion already appears in `text`, so applying this
/// twice gives the same result as applying it once.
pub fn expand_acronym(text: &str) -> String {
    let mut expanded = text.to_string();
    for acronym in ACRONYMS.iter() {
        if expanded.contains(acronym.expansion) || !acronym.pattern.is_match(&expanded) {
            continue;
        }
        expanded = acronym
            .pattern
            .replace_all(&expanded, regex::NoExpand(acronym.replacement.as_str()))
            .into_owned();
    }
    expanded
}

/// Parses a count that may carry thousands separators.
pub fn parse_count(text: &str) -> Option<i64> {
    let stripped: String = text.trim().chars().filter(|ch| *ch != ',').collect();
    stripped.parse::<i64>().ok()
}

/// Regroups an integer with thousands separators.
///
/// Text that is not an integer is returned unchanged.
pub fn format_number(text: &str) -> String {
    match parse_count(text) {
        Some(number) if number < 0 => {
            format!("-{}", group_digits(&number.unsigned_abs().to_string()))
        }
        Some(number) => group_digits(&number.to_string()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_value_maps_empty_inputs_to_na() {
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(AnswerValue::Text(""))), "N/A");
        assert_eq!(format_value(Some(AnswerValue::List(&[]))), "N/A");
        assert_eq!(format_value(Some(AnswerValue::Number(0))), "0");
        let channels = vec!["Amazon".to_string(), "Other".to_string()];
        assert_eq!(format_value(Some(AnswerValue::List(&channels))), "Amazon, Other");
        assert_eq!(format_value(Some(AnswerValue::Text("US, UK"))), "US, UK");
    }

    #[test]
    fn expand_acronym_expands_each_code_once() {
        assert_eq!(expand_acronym("DIF"), "Destroy in Field (DIF)");
        assert_eq!(
            expand_acronym("RTV and ZVR"),
            "Return to Vendor (RTV) and Zero Value Return (ZVR)"
        );
        let once = expand_acronym("DIF, then DIF again");
        assert_eq!(once, "Destroy in Field (DIF), then Destroy in Field (DIF) again");
        assert_eq!(expand_acronym(&once), once);
    }

    #[test]
    fn expand_acronym_matches_whole_tokens_only() {
        assert_eq!(expand_acronym("DIFFERENT"), "DIFFERENT");
        assert_eq!(expand_acronym("Destroy in Field (DIF)"), "Destroy in Field (DIF)");
        assert_eq!(expand_acronym(""), "");
    }

    #[test]
    fn format_number_regroups_or_passes_through() {
        assert_eq!(format_number("150,000"), "150,000");
        assert_eq!(format_number("1500000"), "1,500,000");
        assert_eq!(format_number("12"), "12");
        assert_eq!(format_number("a lot"), "a lot");
        assert_eq!(format_number(""), "");
        assert_eq!(format_number("-2500"), "-2,500");
    }
}
