// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for decoded PCF fields.
//!
//! The parser itself never fails. Numeric tokens that cannot be used are
//! carried as a [`FieldError`] so builders can decide what to do with them.

use thiserror::Error;

/// A numeric field as decoded from a PCF line.
pub type Field = std::result::Result<f64, FieldError>;

/// Why a numeric field has no usable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldError {
    #[error("value missing")]
    Missing,

    #[error("not a number: {0:?}")]
    Malformed(String),

    #[error("not finite: {0:?}")]
    NonFinite(String),
}

/// Decode one whitespace-separated token into a [`Field`].
#[inline]
pub fn parse_field(token: &str) -> Field {
    match fast_float::parse::<f64, _>(token) {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(FieldError::NonFinite(token.to_string())),
        Err(_) => Err(FieldError::Malformed(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_signed_numbers() {
        assert_eq!(parse_field("1000"), Ok(1000.0));
        assert_eq!(parse_field("-12.5"), Ok(-12.5));
        assert_eq!(parse_field("1.5E3"), Ok(1500.0));
    }

    #[test]
    fn rejects_garbage_and_infinities() {
        assert_eq!(
            parse_field("12mm"),
            Err(FieldError::Malformed("12mm".to_string()))
        );
        assert_eq!(
            parse_field("inf"),
            Err(FieldError::NonFinite("inf".to_string()))
        );
        assert!(matches!(parse_field("NaN"), Err(FieldError::NonFinite(_))));
    }
}
