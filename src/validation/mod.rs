//! Validation of raw user-entered text.
//!
//! Every numeric field goes through [`parse_number`] or [`parse_decimal`] so a
//! malformed value becomes an [`InputError`] rather than a crash.

pub mod forms;

use std::str::FromStr;

pub use forms::{GoalForm, LoginForm, ProfileForm, ProgressForm, RegistrationForm, WorkoutForm};

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{field} '{value}' is not one of: {allowed}")]
    NotInVocabulary {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),
}

/// Trimmed, non-empty text.
pub fn required(field: &'static str, raw: &str) -> Result<String, InputError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(InputError::Missing(field));
    }
    Ok(value.to_string())
}

/// Parse a required numeric field.
pub fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
    let value = required(field, raw)?;
    value.parse::<T>().map_err(|_| InputError::InvalidNumber { field, value })
}

/// Parse a required decimal field, accepting a comma as decimal separator.
///
/// NaN and infinities are rejected.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, InputError> {
    let value = required(field, raw)?;
    match value.replace(',', ".").parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(InputError::InvalidNumber { field, value }),
    }
}

/// Require `value` to be listed in `vocabulary` (trimmed comparison).
pub fn one_of(
    field: &'static str,
    raw: &str,
    vocabulary: &[String],
) -> Result<String, InputError> {
    let value = required(field, raw)?;
    match crate::vocabulary::selection_index(vocabulary, &value) {
        Some(index) => Ok(vocabulary[index].trim().to_string()),
        None => Err(InputError::NotInVocabulary {
            field,
            value,
            allowed: vocabulary
                .iter()
                .map(|entry| entry.trim())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Nom", "  Alice ").unwrap(), "Alice");
        assert_eq!(required("Nom", "   "), Err(InputError::Missing("Nom")));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>("Âge", " 34 ").unwrap(), 34);
        assert_eq!(
            parse_number::<u32>("Âge", "trente"),
            Err(InputError::InvalidNumber {
                field: "Âge",
                value: "trente".to_string()
            })
        );
        assert!(parse_number::<u32>("Âge", "-3").is_err());
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("Poids", "72,5").unwrap(), 72.5);
        assert_eq!(parse_decimal("Poids", "72.5").unwrap(), 72.5);
    }

    #[test]
    fn test_parse_decimal_rejects_non_finite() {
        assert!(parse_decimal("Poids", "inf").is_err());
        assert!(parse_decimal("Poids", "NaN").is_err());
        assert!(parse_decimal("Poids", "12abc").is_err());
    }

    #[test]
    fn test_one_of() {
        let genders = crate::vocabulary::default_genders();
        assert_eq!(one_of("Genre", "Femme", &genders).unwrap(), "Femme");
        assert!(matches!(
            one_of("Genre", "femme", &genders),
            Err(InputError::NotInVocabulary { .. })
        ));
    }
}
