//! Value types crossing the adaptor boundary
//!
//! Property values travel as plain strings. These types validate and
//! canonicalize them before they are handed to a backend.

pub mod button_shortcut;
pub mod geometry;
pub mod screen_rotation;
pub mod tablet_area;

pub use button_shortcut::ButtonShortcut;
pub use geometry::Rect;
pub use screen_rotation::ScreenRotation;
pub use tablet_area::TabletArea;

use thiserror::Error;

/// Failure to parse a property value string
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected {expected} values but found {found}")]
    TokenCount { expected: usize, found: usize },

    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("unknown screen rotation '{0}'")]
    UnknownRotation(String),

    #[error("invalid button shortcut '{0}'")]
    InvalidShortcut(String),
}

/// Split `value` on whitespace and parse exactly `expected` integers
pub fn parse_integers(value: &str, expected: usize) -> Result<Vec<i64>, ValueError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(ValueError::TokenCount {
            expected,
            found: tokens.len(),
        });
    }
    tokens
        .into_iter()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| ValueError::NotAnInteger(token.to_string()))
        })
        .collect()
}

/// Split `value` on whitespace and parse exactly `expected` floats
pub fn parse_floats(value: &str, expected: usize) -> Result<Vec<f32>, ValueError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(ValueError::TokenCount {
            expected,
            found: tokens.len(),
        });
    }
    tokens
        .into_iter()
        .map(|token| match token.parse::<f32>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(ValueError::NotANumber(token.to_string())),
        })
        .collect()
}

/// Join numbers with single spaces, keeping their order
pub fn join_numbers<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers_exact_count() {
        assert_eq!(parse_integers("0 10  20\t30", 4), Ok(vec![0, 10, 20, 30]));
        assert_eq!(
            parse_integers("1 2 3", 4),
            Err(ValueError::TokenCount { expected: 4, found: 3 })
        );
        assert_eq!(
            parse_integers("1 2 x 4", 4),
            Err(ValueError::NotAnInteger("x".to_string()))
        );
    }

    #[test]
    fn test_parse_floats_rejects_non_finite() {
        assert_eq!(parse_floats("1.5", 1), Ok(vec![1.5]));
        assert!(parse_floats("inf", 1).is_err());
        assert!(parse_floats("NaN", 1).is_err());
    }

    #[test]
    fn test_join_numbers() {
        assert_eq!(join_numbers(&[1.5f32, 0.0, 2.25]), "1.5 0 2.25");
        assert_eq!(join_numbers::<i64>(&[]), "");
        assert_eq!(join_numbers(&[-1i64, 7]), "-1 7");
    }
}
