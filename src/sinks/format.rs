use std::fmt::Write as _;

use crate::error::{AppError, AppResult, SinkError};

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line).map_err(|err| AppError::sink(SinkError::WriteLine { source: err }))
}

/// Rates and percentages render with two-decimal precision in sink output.
pub(super) fn format_rate(value: f64) -> String {
    format!("{:.2}", value)
}
