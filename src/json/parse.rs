//! Purpose: Provide the runtime JSON decode entrypoint and failure classification.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `location_hint`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Notes: Error mapping to crate errors is done by callsites so stage context stays explicit.

use serde::de::DeserializeOwned;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    use serde_json::error::Category;
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn location_hint(err: &serde_json::Error) -> String {
    format!(
        "parse category: {}; line {}, column {}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}
