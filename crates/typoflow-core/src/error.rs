//! Error types for typoflow.

use miette::Diagnostic;

/// Failure while requesting or reading a style suggestion.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SuggestError {
    /// No API key configured for the suggestion service
    #[error("no API key configured for the suggestion service")]
    #[diagnostic(
        code(typoflow::suggest::missing_api_key),
        help("set GEMINI_API_KEY or pass apiKey in the styler config")
    )]
    MissingApiKey,

    /// Transport-level failure
    #[error("suggestion request failed: {0}")]
    #[diagnostic(code(typoflow::suggest::http))]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("suggestion service returned {status}: {body}")]
    #[diagnostic(code(typoflow::suggest::status))]
    Status { status: u16, body: String },

    /// The service answered without any text
    #[error("suggestion service returned no content")]
    #[diagnostic(code(typoflow::suggest::empty))]
    EmptyResponse,

    /// Response text was not valid JSON
    #[error("suggestion response is not valid JSON: {0}")]
    #[diagnostic(code(typoflow::suggest::json))]
    Json(#[from] serde_json::Error),

    /// Response JSON was valid but not an object
    #[error("suggestion response is not an object: {0}")]
    #[diagnostic(code(typoflow::suggest::shape))]
    NotAnObject(String),
}

/// Invalid configuration value.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("invalid value {value:?} for {key}")]
#[diagnostic(code(typoflow::config))]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}
