use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Footer, Header, Paragraph, Run, RunFonts};

use rfp_spec::{Branding, Document, QaRow, Section};

use crate::DocumentRenderer;
use crate::error::ExportError;
use crate::styles::{DocumentStyles, half_points};

/// Renders the composed document as a Word file: a cover block followed by one page per
/// section, with the consultancy name and footer text repeated on every page.
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer;

impl DocumentRenderer for DocxRenderer {
    fn render(&self, document: &Document, branding: &Branding) -> Result<Vec<u8>, ExportError> {
        generate_docx(document, &DocumentStyles::from_theme(&branding.theme))
    }

    fn extension(&self) -> &'static str {
        "docx"
    }
}

pub fn generate_docx(document: &Document, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .header(Header::new().add_paragraph(header_paragraph(&document.consultancy, styles)))
        .footer(Footer::new().add_paragraph(footer_paragraph(&document.footer, styles)));

    for paragraph in cover_paragraphs(document, styles) {
        docx = docx.add_paragraph(paragraph);
    }

    for section in &document.sections {
        docx = docx.add_paragraph(page_break());
        for paragraph in section_paragraphs(section, styles) {
            docx = docx.add_paragraph(paragraph);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn text_run(text: &str, size_pt: usize, color: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(half_points(size_pt))
        .color(color)
        .fonts(RunFonts::new().ascii(&styles.font))
}

fn header_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run(text, styles.header_size, &styles.primary_color, styles).bold())
}

fn footer_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(text_run(text, styles.footer_size, &styles.body_color, styles))
}

fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

fn cover_paragraphs(document: &Document, styles: &DocumentStyles) -> Vec<Paragraph> {
    vec![
        Paragraph::new().add_run(
            text_run(&document.title, styles.title_size, &styles.body_color, styles).bold(),
        ),
        Paragraph::new().add_run(
            text_run(&document.subtitle, styles.subtitle_size, &styles.body_color, styles).bold(),
        ),
        labelled_paragraph("Company Name", &document.prepared_for.company, styles),
        labelled_paragraph("Contact Name", &document.prepared_for.contact, styles),
    ]
}

fn labelled_paragraph(label: &str, value: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .add_run(
            text_run(&format!("{label}: "), styles.body_size, &styles.body_color, styles).bold(),
        )
        .add_run(text_run(value, styles.body_size, &styles.body_color, styles))
}

fn section_paragraphs(section: &Section, styles: &DocumentStyles) -> Vec<Paragraph> {
    let mut paragraphs = vec![
        Paragraph::new()
            .keep_next(true)
            .add_run(
                text_run(
                    &format!("{}.0 {}", section.number, section.title),
                    styles.section_size,
                    &styles.body_color,
                    styles,
                )
                .bold(),
            ),
    ];

    if let Some(narrative) = &section.narrative {
        paragraphs.push(
            Paragraph::new()
                .align(AlignmentType::Both)
                .add_run(text_run(narrative, styles.body_size, &styles.body_color, styles)),
        );
    }

    paragraphs.extend(section.rows.iter().map(|row| row_paragraph(row, styles)));

    if let Some(insight) = &section.insight {
        paragraphs.push(
            Paragraph::new()
                .add_run(text_run(insight, styles.body_size, &styles.muted_color, styles).italic()),
        );
    }

    paragraphs
}

fn row_paragraph(row: &QaRow, styles: &DocumentStyles) -> Paragraph {
    labelled_paragraph(&row.question, &row.answer, styles).keep_lines(row.keep_together)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rfp_spec::{AnswerRecord, compose};

    #[test]
    fn produces_a_zip_container() {
        let document = compose(&AnswerRecord::default(), &Branding::default());
        let bytes = DocxRenderer
            .render(&document, &Branding::default())
            .expect("docx render");
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn theme_colours_drop_hash_prefix() {
        let mut branding = Branding::default();
        branding.theme.primary = "#112233".into();
        let styles = DocumentStyles::from_theme(&branding.theme);
        assert_eq!(styles.primary_color, "112233");
        assert_eq!(styles.body_size, 10);
    }
}
