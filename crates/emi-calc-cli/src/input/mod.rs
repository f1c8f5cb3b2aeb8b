pub mod file;
pub mod stdin;

use emi_calc_core::EmiCalcError;
use serde::de::DeserializeOwned;

/// Structured input from `--input <file>`, else from piped stdin.
///
/// None means the caller should build the input from flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path).map(Some);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(
            serde_json::from_value(data).map_err(EmiCalcError::from)?,
        )),
        None => Ok(None),
    }
}
