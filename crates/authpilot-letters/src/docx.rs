use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use tracing::debug;

use crate::error::LetterError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from letter text.
///
/// Letters are plain text with a light structure:
/// - `Heading:` alone on a line, or `# Heading` / `## Heading` → section heading
/// - `- item` or `• item` → bullet list item
/// - blank line → empty paragraph
/// - `**bold**` inside any line → bold run
/// - everything else → normal paragraph
pub fn generate_docx(letter: &str, styles: &DocumentStyles) -> Result<Vec<u8>, LetterError> {
    let mut docx = Docx::new().add_style(heading_style(styles.heading_size));
    let mut paragraphs = 0usize;

    for line in letter.lines() {
        let trimmed = line.trim();
        paragraphs += 1;

        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
        } else if let Some(text) = markdown_heading(trimmed) {
            docx = docx.add_paragraph(heading_paragraph(text, styles));
        } else if is_section_heading(trimmed) {
            docx = docx.add_paragraph(heading_paragraph(trimmed, styles));
        } else if let Some(text) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("\u{2022} "))
        {
            docx = docx.add_paragraph(bullet_paragraph(text, styles));
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| LetterError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    debug!(paragraphs, bytes = bytes.len(), "generated letter docx");
    Ok(bytes)
}

fn markdown_heading(line: &str) -> Option<&str> {
    line.strip_prefix("### ")
        .or_else(|| line.strip_prefix("## "))
        .or_else(|| line.strip_prefix("# "))
}

/// A short line ending in a colon with no other sentence punctuation, such
/// as `Clinical Presentation:`.
fn is_section_heading(line: &str) -> bool {
    let Some(label) = line.strip_suffix(':') else {
        return false;
    };
    !label.is_empty()
        && label.len() <= 48
        && !label.contains(['.', ',', ':', '-'])
        && label.chars().next().is_some_and(char::is_uppercase)
        && label.split_whitespace().count() <= 5
}

fn heading_style(size_pt: usize) -> Style {
    Style::new("LetterHeading", StyleType::Paragraph)
        .name("letter heading")
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
}

fn heading_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style("LetterHeading").add_run(
        Run::new()
            .add_text(text)
            .bold()
            .size(styles.heading_size * 2)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let bullet_run = Run::new()
        .add_text("\u{2022} ")
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font));

    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(bullet_run);

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

/// Split `**bold**` segments into runs. An unclosed marker is kept as text.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let plain = |s: &str| {
        Run::new()
            .add_text(s)
            .size(styles.body_size * 2)
            .fonts(RunFonts::new().ascii(&styles.body_font))
    };

    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let after_start = &remaining[start + 2..];
        let Some(end) = after_start.find("**") else {
            break;
        };
        if start > 0 {
            runs.push(plain(&remaining[..start]));
        }
        runs.push(plain(&after_start[..end]).bold());
        remaining = &after_start[end + 2..];
    }

    if !remaining.is_empty() {
        runs.push(plain(remaining));
    }

    runs
}
