use std::sync::LazyLock;

use regex::Regex;

use crate::answers::AnswerRecord;
use crate::branding::Branding;

static SEPARATORS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").ok());

/// Suggested download name: `Jane-Doe-RFP.<extension>`, or `RFP.<extension>` without a name.
pub fn suggested_filename(record: &AnswerRecord, branding: &Branding, extension: &str) -> String {
    let stem = slug(record.name.trim())
        .map(|slug| format!("{}-{}", slug, branding.filename_suffix))
        .unwrap_or_else(|| branding.fallback_filename.clone());
    format!("{}.{}", stem, extension.trim_start_matches('.'))
}

fn slug(name: &str) -> Option<String> {
    let collapsed = match SEPARATORS.as_ref() {
        Some(separators) => separators.replace_all(name, "-").into_owned(),
        None => name.split_whitespace().collect::<Vec<_>>().join("-"),
    };
    let trimmed = collapsed.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
