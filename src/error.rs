use thiserror::Error;

/// Validation failure while turning a decoded JSON snapshot into a
/// [`Reading`](crate::reading::Reading). Every variant carries the path of
/// the offending field so the log line points at the upstream document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{path}` expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("sensor `{key}` has unrecognized discriminator `{discriminator}`")]
    UnknownVariant { key: String, discriminator: String },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("document missing `{0}`")]
    MalformedDocument(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
