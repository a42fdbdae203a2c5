//! Bounded field checks shared by every entity.
//!
//! Required strings are trimmed and must be non-empty; all strings are bounded by the
//! column's max length (counted in characters, matching `varchar(n)` semantics).
//! Decimals are brought to their `numeric(p, s)` column with [`Numeric::fit`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Reason a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be between -{max} and {max}")]
    OutOfRange { field: &'static str, max: Decimal },
}

/// Trim `value` and check it is present and at most `max` characters long.
pub fn required(field: &'static str, value: &str, max: usize) -> Result<String, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required { field });
    }
    if value.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

/// Trim an optional field. Blank input becomes `None`.
pub fn optional(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, FieldError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > max => Err(FieldError::TooLong { field, max }),
        Some(v) => Ok(Some(v.to_owned())),
    }
}

/// Shape of a `numeric(precision, scale)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numeric {
    pub precision: u32,
    pub scale: u32,
}

impl Numeric {
    /// `precision` is at most 18 and `scale` at most `precision`.
    pub const fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }

    /// Largest magnitude the column can hold, e.g. `99999999.99` for `numeric(10, 2)`.
    pub fn max(self) -> Decimal {
        Decimal::new(10_i64.pow(self.precision) - 1, self.scale)
    }

    /// Round `value` to the column scale (half away from zero, as Postgres does on insert)
    /// and reject it when the rounded value does not fit.
    pub fn fit(self, field: &'static str, value: Decimal) -> Result<Decimal, FieldError> {
        let rounded =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero);
        let max = self.max();
        if rounded.abs() > max {
            return Err(FieldError::OutOfRange { field, max });
        }
        Ok(rounded)
    }
}
