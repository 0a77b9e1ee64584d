//! Minimal HTML document for browser print-to-PDF.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::LetterError;
use crate::styles::DocumentStyles;

// The `.html` name turns on Tera's autoescaping, so letter text can never
// inject markup.
const PRINT_TEMPLATE_NAME: &str = "print.html";

const PRINT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
    <style>
      body { font-family: {{ font }}, sans-serif; font-size: {{ font_size }}pt; line-height: {{ line_height }}; margin: {{ margin }}px; }
      p { margin: 0 0 1em 0; }
      @media print { body { margin: {{ print_margin }}px; } }
    </style>
  </head>
  <body>
{% for paragraph in paragraphs %}    <p>{% for line in paragraph %}{{ line }}{% if not loop.last %}<br>{% endif %}{% endfor %}</p>
{% endfor %}  </body>
</html>
"#;

#[derive(Debug, Serialize)]
struct PrintContext<'a> {
    title: &'a str,
    font: &'a str,
    font_size: usize,
    line_height: f64,
    margin: u32,
    print_margin: u32,
    paragraphs: Vec<Vec<&'a str>>,
}

/// Wrap letter text in a styled, print-ready HTML page. Blank lines split
/// paragraphs; single line breaks are kept.
pub fn render_print_document(
    title: &str,
    letter: &str,
    styles: &DocumentStyles,
) -> Result<String, LetterError> {
    let mut tera = Tera::default();
    tera.add_raw_template(PRINT_TEMPLATE_NAME, PRINT_TEMPLATE)
        .map_err(|e| LetterError::TemplateParse(e.to_string()))?;

    let context = PrintContext {
        title,
        font: &styles.body_font,
        font_size: styles.body_size,
        line_height: styles.line_height,
        margin: styles.margin_px,
        print_margin: styles.margin_px / 2,
        paragraphs: paragraphs(letter),
    };

    Ok(tera.render(PRINT_TEMPLATE_NAME, &Context::from_serialize(&context)?)?)
}

fn paragraphs(letter: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for line in letter.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
