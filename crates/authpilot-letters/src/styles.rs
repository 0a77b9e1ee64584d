use serde::{Deserialize, Serialize};

/// Typography shared by the DOCX and print exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Font for body text (e.g. "Arial", "Times New Roman").
    pub body_font: String,

    /// Font for section headings.
    pub heading_font: String,

    /// Body text font size in points.
    pub body_size: usize,

    /// Section heading font size in points.
    pub heading_size: usize,

    /// Line height multiplier for the print document.
    pub line_height: f64,

    /// Page margin in pixels for the print document.
    pub margin_px: u32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Arial".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 11,
            heading_size: 13,
            line_height: 1.6,
            margin_px: 40,
        }
    }
}
