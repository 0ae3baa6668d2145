use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("Missing CSRF token")]
    MissingToken,

    #[error("Invalid CSRF token")]
    InvalidToken,
}

impl CsrfError {
    /// Message shown to the user when a protected form is rejected.
    ///
    /// Both variants map to the same text.
    pub fn user_message(&self) -> &'static str {
        "Bad or missing CSRF token"
    }
}

pub type Result<T> = std::result::Result<T, CsrfError>;
