/// Domain errors raised by pure `muac-core` logic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The dialect name is not one of the supported engines.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password hashing or credential policy failure.
    #[error("Credential error: {0}")]
    Credential(String),
}
