use std::io::Write;

use serde::Serialize;
use warden_core::{AppError, AppResult};

/// Writes a value to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let encoded = serde_json::to_string_pretty(value)
        .map_err(|error| AppError::Internal(format!("failed to encode output: {error}")))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{encoded}")
        .map_err(|error| AppError::Internal(format!("failed to write output: {error}")))
}

/// Lists field-level problems on stderr, one per line.
pub fn report_validation(error: &AppError) {
    match error {
        AppError::InvalidFields(fields) => {
            for (field, message) in fields.iter() {
                eprintln!("  {field}: {message}");
            }
        }
        AppError::InvalidRows(rows) => {
            for (row, fields) in rows.iter() {
                for (field, message) in fields.iter() {
                    eprintln!("  row {}: {field}: {message}", row + 1);
                }
            }
        }
        _ => {}
    }
}
