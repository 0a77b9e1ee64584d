use thiserror::Error;

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),
}

impl From<tera::Error> for LetterError {
    fn from(e: tera::Error) -> Self {
        LetterError::TemplateRender(e.to_string())
    }
}
