use crate::utils::error::{RaffleError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RaffleError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(RaffleError::ConfigError {
            message: format!("{} contains null bytes: {:?}", field_name, path),
        });
    }

    Ok(())
}

pub fn validate_existing_directory(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if !Path::new(path).is_dir() {
        return Err(RaffleError::ConfigError {
            message: format!("{} '{}' does not exist or is not a directory", field_name, path),
        });
    }

    Ok(())
}

/// Trims the value; an id that is blank after trimming is rejected.
pub fn parse_id(field_name: &str, value: &str, line: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RaffleError::EmptyField {
            field: field_name.to_string(),
            line,
        });
    }
    Ok(trimmed.to_string())
}

pub fn parse_positive_integer(
    field_name: &str,
    value: &str,
    min_value: i64,
    line: usize,
) -> Result<usize> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| RaffleError::InvalidInteger {
            field: field_name.to_string(),
            value: value.to_string(),
            line,
        })?;

    if parsed < min_value {
        return Err(RaffleError::IntegerBelowMinimum {
            field: field_name.to_string(),
            value: parsed,
            minimum: min_value,
            line,
        });
    }

    usize::try_from(parsed).map_err(|_| RaffleError::InvalidInteger {
        field: field_name.to_string(),
        value: value.to_string(),
        line,
    })
}

/// Accepts `true` / `false` in any letter case, nothing else.
pub fn parse_bool(field_name: &str, value: &str, line: usize) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RaffleError::InvalidBoolean {
            field: field_name.to_string(),
            value: value.to_string(),
            line,
        })
    }
}
