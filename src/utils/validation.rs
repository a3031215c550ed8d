use crate::utils::error::{ClinicError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_numeric)
}

fn has_alphabetic(value: &str) -> bool {
    value.chars().any(char::is_alphabetic)
}

/// A name must be non-empty, contain at least one letter and not be only digits.
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty() && !is_all_digits(value) && has_alphabetic(value)
}

/// Same rule as [`is_valid_name`], applied to free-text consultation fields.
pub fn is_valid_reason_or_diagnosis(value: &str) -> bool {
    is_valid_name(value)
}

/// Accepts digits mixed with non-letter separators such as `10/05/2024`.
///
/// A bare digit string like `20240510` is rejected on purpose so that a plain
/// integer is never taken for a date.
pub fn is_valid_date(value: &str) -> bool {
    !value.is_empty()
        && !is_all_digits(value)
        && value.chars().any(char::is_numeric)
        && !has_alphabetic(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    !value.is_empty() && !value.chars().all(char::is_alphabetic)
}

pub fn is_valid_address(value: &str) -> bool {
    !value.is_empty()
}

/// Parses an age made only of ASCII digits. Signs, spaces and overflow are rejected.
pub fn parse_age(value: &str) -> Option<u32> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

pub fn validate_name(field_name: &str, label: &str, value: &str) -> Result<()> {
    if is_valid_name(value) {
        return Ok(());
    }
    Err(ClinicError::validation(
        field_name,
        value,
        &format!("{} must contain letters and cannot be only numbers.", label),
    ))
}

pub fn validate_reason_or_diagnosis(field_name: &str, label: &str, value: &str) -> Result<()> {
    if is_valid_reason_or_diagnosis(value) {
        return Ok(());
    }
    Err(ClinicError::validation(
        field_name,
        value,
        &format!("{} must contain letters and cannot be only numbers.", label),
    ))
}

pub fn validate_date(value: &str) -> Result<()> {
    if is_valid_date(value) {
        return Ok(());
    }
    Err(ClinicError::validation(
        "date",
        value,
        "Date must not be only numbers, cannot be empty and should contain digits and separators (e.g. 10/05/2024).",
    ))
}

pub fn validate_phone(value: &str) -> Result<()> {
    if is_valid_phone(value) {
        return Ok(());
    }
    Err(ClinicError::validation(
        "phone",
        value,
        "Phone must be a non-empty number.",
    ))
}

pub fn validate_address(value: &str) -> Result<()> {
    if is_valid_address(value) {
        return Ok(());
    }
    Err(ClinicError::validation(
        "address",
        value,
        "Address cannot be empty.",
    ))
}

pub fn validate_age(value: &str) -> Result<u32> {
    parse_age(value).ok_or_else(|| {
        ClinicError::validation("age", value, "Age must be a non-negative integer.")
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClinicError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(extension) => {}
            Some(extension) => {
                return Err(ClinicError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(ClinicError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}
