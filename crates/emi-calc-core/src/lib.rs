pub mod error;
pub mod format;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "investment")]
pub mod investment;

pub use error::EmiCalcError;
pub use types::*;

/// Standard result type for the fallible (non-numeric) boundary of the crate
pub type EmiCalcResult<T> = Result<T, EmiCalcError>;
