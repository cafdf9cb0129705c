use serde::{Deserialize, Serialize};

use rfp_spec::Theme;

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for all text runs.
    pub font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Cover title font size in points.
    pub title_size: usize,

    /// Cover subtitle font size in points.
    pub subtitle_size: usize,

    /// Section heading font size in points.
    pub section_size: usize,

    /// Running header font size in points.
    pub header_size: usize,

    /// Running footer font size in points.
    pub footer_size: usize,

    /// Hex colours, no leading `#`.
    pub primary_color: String,
    pub body_color: String,
    pub muted_color: String,
}

impl DocumentStyles {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            primary_color: theme.primary.trim_start_matches('#').to_string(),
            body_color: theme.body_text.trim_start_matches('#').to_string(),
            muted_color: theme.muted.trim_start_matches('#').to_string(),
            ..Self::default()
        }
    }
}

impl Default for DocumentStyles {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            font: "Helvetica".to_string(),
            body_size: 10,
            title_size: 22,
            subtitle_size: 14,
            section_size: 16,
            header_size: 14,
            footer_size: 8,
            primary_color: theme.primary,
            body_color: theme.body_text,
            muted_color: theme.muted,
        }
    }
}

/// OOXML run sizes are expressed in half-points.
pub(crate) fn half_points(size_pt: usize) -> usize {
    size_pt * 2
}
