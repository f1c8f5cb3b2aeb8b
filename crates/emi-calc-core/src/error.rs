use thiserror::Error;

/// Errors raised at the input boundary.
///
/// Numeric degeneracy (zero rate, zero tenure, overflow) never surfaces here;
/// the calculators fall back to zero or empty results instead.
#[derive(Debug, Error)]
pub enum EmiCalcError {
    #[error("Unknown investment scheme '{0}' (expected one of: fd, rd, ppf, insurance)")]
    UnknownScheme(String),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EmiCalcError {
    fn from(e: serde_json::Error) -> Self {
        EmiCalcError::SerializationError(e.to_string())
    }
}
